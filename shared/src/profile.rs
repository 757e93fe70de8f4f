use crate::config::Config;
use crate::error::LookupError;
use crate::guest::{GuestClient, GuestUser};
use crate::types::ProfileRecord;

/// Marker the guest API puts in thumbnail-sized picture URLs
const NORMAL_SIZE_MARKER: &str = "_normal";

/// Drop every occurrence of the normal-size marker to get the full-resolution asset
pub fn normalize_picture_url(url: &str) -> String {
    url.replace(NORMAL_SIZE_MARKER, "")
}

/// Build the public record from a guest user, falling back to the requested handle
pub fn profile_from_user(user: GuestUser, requested_handle: &str) -> ProfileRecord {
    let screen_name = user
        .screen_name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| requested_handle.to_string());

    let picture_url = user
        .profile_image_url_https
        .or(user.profile_image_url)
        .unwrap_or_default();

    ProfileRecord {
        pfp_url: normalize_picture_url(&picture_url),
        name: user.name.unwrap_or_default(),
        handle: format!("@{}", screen_name),
    }
}

/// Look up a user's profile through a fresh guest session.
///
/// Activation and the user fetch run strictly in sequence, once each; nothing
/// is retried and no session outlives the call.
pub async fn lookup_profile(config: &Config, handle: &str) -> Result<ProfileRecord, LookupError> {
    if handle.is_empty() {
        return Err(LookupError::MissingUsername);
    }
    tracing::info!("Attempting to fetch PFP URL for: {}", handle);

    let mut client = GuestClient::new(config)
        .map_err(|e| LookupError::SessionActivation(e.to_string()))?;
    if let Err(e) = client.activate().await {
        tracing::error!("Could not activate the guest client: {}", e);
        return Err(LookupError::SessionActivation(e.to_string()));
    }

    let user = match client.get_user_by_screen_name(handle).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(
                "❌ User '{}' may not exist or their profile is protected: {}",
                handle,
                e
            );
            return Err(LookupError::NotFoundOrProtected {
                handle: handle.to_string(),
                detail: e.to_string(),
            });
        }
    };

    let record = profile_from_user(user, handle);
    tracing::info!(
        "Found PFP URL: {} | name: {} | handle: {}",
        record.pfp_url,
        record.name,
        record.handle
    );
    Ok(record)
}
