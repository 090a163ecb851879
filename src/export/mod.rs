//! Print/export adapter: paginates the day grid onto fixed page dimensions
//! and renders each page as a standalone SVG. All geometry comes from
//! `crate::layout`; this module adds pagination and drawing only.

pub mod page;
pub mod svg;

pub use page::{layout_page, plan_pages, PageLayout, PagePlan, PageRow, PageSlice};
pub use svg::render_page;
