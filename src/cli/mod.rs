//! Interactive command layer.
//!
//! [`mix`] is the whole run: authorize, list playlists, read the user's
//! selection, aggregate and shuffle the tracks, create the destination
//! playlist and write the tracks back in batches.

mod mix;

pub use mix::mix;
