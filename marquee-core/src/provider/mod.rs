pub mod tmdb;
pub mod traits;

#[cfg(test)]
pub use traits::MockDiscoveryClient;
pub use tmdb::TmdbClient;
pub use traits::{
    DiscoverPage, DiscoveryClient, ProviderError, RawDetails, RawGenre, RawMediaResult, RawReview,
    RawVideo, RawVideos,
};
