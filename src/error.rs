//! Error types

use thiserror::Error;

/// Reasons an icon fetch produced no image.
///
/// None of these reach the user: the icon area simply keeps whatever it
/// showed before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    #[error("sync channel did not connect within the timeout")]
    ConnectTimeout,
    #[error("sync channel refused the connection")]
    ConnectFailed,
    #[error("asset handle could not be resolved")]
    AssetNotFound,
    #[error("asset exceeds the fetch buffer")]
    AssetTooLarge,
    #[error("asset stream read failed")]
    Read,
    #[error("asset is not a decodable bitmap")]
    Decode,
    #[error("sync client error")]
    Client,
}
