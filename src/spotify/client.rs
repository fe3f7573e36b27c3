use reqwest::Client;

use crate::{
    config::Config,
    error::Error,
    mixer::{TrackSink, TrackSource},
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, PlaylistItem, PlaylistItemsPage,
        PlaylistSummary, PrivateUser, Token,
    },
};

/// Authenticated handle for the Spotify Web API. Owns the token for the
/// remainder of the run once the authorizer hands it over.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: Token,
}

impl SpotifyClient {
    pub fn new(config: &Config, token: Token) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: config.api_url.clone(),
            token,
        }
    }

    /// GET /me
    pub async fn current_user(&self) -> Result<PrivateUser, Error> {
        let api_url = format!("{}/me", self.api_url);
        self.get_json(&api_url, "current user").await
    }

    /// GET /users/{user_id}/playlists
    ///
    /// A single page of up to 50 playlists, in the order the API returns
    /// them; that order is what the numbered selection indexes into.
    pub async fn playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, Error> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists?limit=50",
            uri = self.api_url,
            user_id = user_id
        );
        let res: GetUserPlaylistsResponse = self.get_json(&api_url, "playlists").await?;
        Ok(res.items)
    }

    /// POST /users/{user_id}/playlists
    ///
    /// The new playlist is public and non-collaborative. An empty name is
    /// rejected locally before any request goes out.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<CreatePlaylistResponse, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptyPlaylistName);
        }

        let api_url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.api_url,
            user_id = user_id
        );
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Playlist mixed by mixcli".to_string(),
            public: true,
            collaborative: false,
        };

        let res = self
            .http
            .post(&api_url)
            .bearer_auth(&self.token.access_token)
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::Create)?;

        res.json().await.map_err(Error::Create)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        api_url: &str,
        what: &str,
    ) -> Result<T, Error> {
        let res = self
            .http
            .get(api_url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|source| Error::Fetch {
                what: what.to_string(),
                source: Box::new(source),
            })?;

        res.json().await.map_err(|source| Error::Fetch {
            what: what.to_string(),
            source: Box::new(source),
        })
    }
}

impl TrackSource for SpotifyClient {
    /// GET /playlists/{playlist_id}/tracks with offset/limit pagination.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, Error> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks?offset={offset}&limit={limit}",
            uri = self.api_url,
            playlist_id = playlist_id,
            offset = offset,
            limit = limit
        );
        let page: PlaylistItemsPage = self.get_json(&api_url, "playlist items").await?;
        Ok(page.items)
    }
}

impl TrackSink for SpotifyClient {
    /// POST /playlists/{playlist_id}/tracks with one uris batch.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<(), Error> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks",
            uri = self.api_url,
            playlist_id = playlist_id
        );
        let body = AddTracksToPlaylistRequest {
            uris: track_ids
                .iter()
                .map(|id| format!("spotify:track:{}", id))
                .collect(),
        };

        let res = self
            .http
            .post(&api_url)
            .bearer_auth(&self.token.access_token)
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::Write(Box::new(e)))?;

        let _: AddTracksToPlaylistResponse = res
            .json()
            .await
            .map_err(|e| Error::Write(Box::new(e)))?;
        Ok(())
    }
}
