// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod columns;
pub mod facets;
pub mod fetch;
pub mod fields;
pub mod format;
pub mod i18n;
pub mod ids;
pub mod model;
pub mod process;
pub mod status;
pub mod table;

pub use columns::*;
pub use facets::*;
pub use fetch::*;
pub use fields::*;
pub use format::*;
pub use i18n::*;
pub use ids::*;
pub use model::*;
pub use process::*;
pub use status::*;
pub use table::*;
