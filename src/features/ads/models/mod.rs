mod ad;

pub use ad::{Ad, AdSummary, AdWithAuthor};
