use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config, error::Error, info, mixer, spotify, success, types::PlaylistTableRow, utils,
    warning,
};

/// Runs one complete mix: authorize, select, aggregate, shuffle, write.
///
/// Everything up to and including track aggregation is fail-fast; once the
/// destination playlist exists, batch writes are best-effort and a partial
/// playlist is preferred over none.
pub async fn mix(config: &Config) -> Result<(), Error> {
    let client = spotify::auth::authorize(config).await?;

    let user = client.current_user().await?;
    success!(
        "Hello, {}!",
        user.display_name.as_deref().unwrap_or(&user.id)
    );

    let playlists = client.playlists(&user.id).await?;
    info!("Here are your playlists! You have {} playlists:", playlists.len());

    let table_rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .enumerate()
        .map(|(index, playlist)| PlaylistTableRow {
            index,
            name: playlist.name.clone(),
            tracks: playlist.tracks.total,
        })
        .collect();
    println!("{}", Table::new(table_rows));

    let raw_selection = utils::read_line("Select playlists to mix (comma-separated numbers):")?;
    let selection = utils::parse_selection(&raw_selection, playlists.len())?;

    info!("Selected playlists:");
    for &index in &selection {
        println!(" - {} (ID: {})", playlists[index].name, playlists[index].id);
    }

    let selected_ids: Vec<String> = selection
        .iter()
        .map(|&index| playlists[index].id.clone())
        .collect();

    let pb = spinner("Fetching tracks...");
    let collected = mixer::collect_tracks(&client, &selected_ids, mixer::PAGE_SIZE).await;
    pb.finish_and_clear();

    let mut tracks = collected?;
    success!("Fetched {} tracks.", tracks.len());

    utils::shuffle_tracks(&mut tracks);

    let playlist_name = utils::read_line("Enter a name for the new playlist:")?;
    let created = client.create_playlist(&user.id, &playlist_name).await?;

    info!("Mixing {} tracks into \"{}\"...", tracks.len(), created.name);
    let report = mixer::push_in_batches(&client, &created.id, &tracks, mixer::BATCH_SIZE).await;

    if report.succeeded < report.attempted {
        warning!(
            "Created playlist \"{}\", but only {} of {} batches were written.",
            created.name,
            report.succeeded,
            report.attempted
        );
    } else {
        success!("Successfully created your new playlist mix: {}", created.name);
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
