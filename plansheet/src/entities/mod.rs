mod part;
mod project;
mod sheet;
mod template;

#[doc(inline)]
pub use part::CellPos;

#[doc(inline)]
pub use part::Footprint;

#[doc(inline)]
pub use part::Part;

#[doc(inline)]
pub use part::PartCategory;

#[doc(inline)]
pub use part::Rotation;

#[doc(inline)]
pub use part::{SCALE_MAX, SCALE_MIN};

#[doc(inline)]
pub use project::Page;

#[doc(inline)]
pub use project::Project;

#[doc(inline)]
pub use project::ProjectMeta;

#[doc(inline)]
pub use sheet::PartKey;

#[doc(inline)]
pub use sheet::SheetGrid;

#[doc(inline)]
pub use template::Template;

#[doc(inline)]
pub use template::TemplateSlot;
