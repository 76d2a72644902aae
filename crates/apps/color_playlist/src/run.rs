use crate::cli::Args;
use crate::terminal_view::{TerminalProgress, format_results};
use app_state::AppSettings;
use color_eyre::Result;
use color_eyre::eyre::{OptionExt, WrapErr};
use color_picker::{ColorPicker, MouseEvent, PickerSurface, Viewport, dispatch_mouse};
use common_services::api_client::{ApiClient, PlaylistApi};
use common_services::workflow::Workflow;
use tracing::info;

pub async fn run(args: Args, settings: AppSettings) -> Result<()> {
    let surface = PickerSurface::new(settings.picker.width, settings.picker.height)?;
    let viewport = Viewport::of(&surface);
    let mut picker = ColorPicker::new(surface, viewport);

    let color = if let Some(point) = args.pick {
        let picked = dispatch_mouse(&mut picker, MouseEvent::Down(point));
        dispatch_mouse(&mut picker, MouseEvent::Up);
        picked.ok_or_eyre("Nothing to pick at that point")?
    } else {
        let text = args.color.as_deref().unwrap_or_default();
        picker
            .set_color_code(text)
            .ok_or_else(|| color_eyre::eyre::eyre!("Invalid hex color: {text}"))?
    };
    if let Some(marker) = picker.marker() {
        info!("Target {color}, marker at ({:.0}, {:.0})", marker.x, marker.y);
    }

    let client = ApiClient::new(&settings.backend)?;
    client
        .health()
        .await
        .wrap_err_with(|| format!("Backend at {} is unreachable", client.base_url()))?;

    let mut workflow = Workflow::new(client, settings.analysis.clone(), &settings.results);
    let mut view = TerminalProgress::default();
    workflow
        .build(
            &color.to_string(),
            args.source,
            args.playlist_url.as_deref(),
            args.limit,
            &mut view,
        )
        .await?;

    if let Some(top_n) = &args.top_n {
        workflow.set_top_n_input(top_n);
    }
    for line in format_results(workflow.results()) {
        println!("{line}");
    }

    if args.save {
        let saved = workflow.save(args.name.as_deref(), &mut view).await?;
        println!(
            "Saved {} ({} of {} tracks added)",
            saved.collection_url.as_deref().unwrap_or("playlist without a link"),
            saved.added,
            saved.requested
        );
    }

    Ok(())
}
