//! Report-lost / report-found commands.

use std::path::Path;

use lnf_client::views::ReportView;
use lnf_client::{ClientError, ImageUpload};
use lnf_core::ItemType;
use tracing::info;

use crate::cli::ReportArgs;
use crate::commands::{action_error, request_scope};
use crate::error::{CliError, CliResult};
use crate::state::AppState;

pub async fn submit(state: &AppState, item_type: ItemType, args: ReportArgs) -> CliResult<()> {
    if !state.auth.is_authenticated().await {
        return Err(CliError::not_signed_in());
    }

    let mut view = ReportView::new(item_type);
    args.fields.apply(&mut view.draft);
    if let Some(path) = &args.image {
        let upload = ImageUpload::from_path(path)
            .await
            .map_err(|e| image_error(path, &e))?;
        info!(file = %upload.file_name, bytes = upload.bytes.len(), "Attaching image");
        view.image = Some(upload);
    }

    let cancel = request_scope();
    view.submit(&state.api, &state.auth, &cancel)
        .await
        .map_err(|message| action_error(&message))?;

    println!("Report Submitted!");
    println!("{}", view.confirmation());
    Ok(())
}

/// An unreadable `--image` is a problem with the form, not the config.
fn image_error(path: &Path, err: &ClientError) -> CliError {
    CliError::validation(format!("Cannot read image {}: {}", path.display(), err))
}
