pub mod cricapi;

pub use cricapi::CricApiClient;
