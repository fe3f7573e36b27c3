use std::io::{self, Write};

use rand::{Rng, distr::Alphanumeric};
use rand::seq::SliceRandom;

use crate::error::Error;

/// Generates the anti-CSRF state nonce round-tripped through the
/// authorization flow.
pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Parses a comma-separated list of playlist indices against a listing of
/// `len` entries.
///
/// Tokens are trimmed individually; every token must be a non-negative
/// integer below `len`. Duplicates are kept and input order is preserved.
/// The first invalid token fails the whole parse, so callers never see a
/// partial selection.
pub fn parse_selection(input: &str, len: usize) -> Result<Vec<usize>, Error> {
    let mut indices = Vec::new();

    for token in input.split(',') {
        let token = token.trim();
        let index: usize = token
            .parse()
            .map_err(|_| Error::Selection(format!("invalid index: {:?}", token)))?;

        if index >= len {
            return Err(Error::Selection(format!(
                "index {} out of range (have {} playlists)",
                index, len
            )));
        }

        indices.push(index);
    }

    Ok(indices)
}

/// Shuffles the aggregated tracks in place. Fisher-Yates via rand, every
/// permutation equally likely.
pub fn shuffle_tracks(tracks: &mut [String]) {
    tracks.shuffle(&mut rand::rng());
}

/// Prints `prompt` and reads one trimmed line from stdin.
pub fn read_line(prompt: &str) -> Result<String, Error> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
