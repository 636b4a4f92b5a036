//! Reader logic for Folio.
//!
//! Everything here is pure: given a [`Book`](folio_book::Book) and a
//! [`State`], the same view and metadata come out every time. Applying them
//! to HTML and fetching chapter content happens in `folio-site`.
//!
//! - [`state`]: the reader state and its reducer
//! - [`view`]: the view model behind the page chrome
//! - [`meta`]: document title, SEO tags, alternates and JSON-LD

pub mod meta;
pub mod state;
pub mod view;

pub use meta::{AlternateLink, MetaKind, MetaTag, PageMeta, canonical_base};
pub use state::{Event, State, reduce};
pub use view::{ChapterView, ReaderView};
