//! # foldview-entity
//!
//! Domain models for foldview. [`folder::Folder`] is one node of the
//! immutable hierarchy snapshot; [`folder::PresentedNode`] is the unit a
//! render emits. All models derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod folder;
