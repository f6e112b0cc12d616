pub mod check;
pub mod clean;
pub mod download;
pub mod fetch;
pub mod merge;
pub mod mix;
pub mod number;
pub mod urls;
