// Adapters layer: concrete implementations of the domain ports (storage,
// word lists, clocks) and the HTTP surface.

pub mod clock;
#[cfg(feature = "server")]
pub mod http;
pub mod storage;
pub mod wordlist;
