mod journal;
mod view;

pub use journal::Journal;
