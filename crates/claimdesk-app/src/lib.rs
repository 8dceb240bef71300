// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod forms;
pub mod ids;
pub mod links;
pub mod model;
pub mod selection;
pub mod state;

pub use forms::*;
pub use ids::*;
pub use links::*;
pub use model::*;
pub use selection::*;
pub use state::*;
