mod footprint;
mod manager;

#[doc(inline)]
pub use footprint::FootprintRules;

#[doc(inline)]
pub use footprint::SizeRule;

#[doc(inline)]
pub use manager::LayoutManager;

#[doc(inline)]
pub use manager::Reseat;
