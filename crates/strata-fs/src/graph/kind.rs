// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use strum::Display;

/// Identifies the kind of object this is for the purposes of encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ObjectKind {
    Blob = 0,
    Tree = 1,
    Manifest = 2,
    Layer = 3,
    Platform = 4,
    Mask = 5,
}

impl ObjectKind {
    pub fn from_u8(kind: u8) -> Option<Self> {
        match kind {
            0 => Some(Self::Blob),
            1 => Some(Self::Tree),
            2 => Some(Self::Manifest),
            3 => Some(Self::Layer),
            4 => Some(Self::Platform),
            5 => Some(Self::Mask),
            _ => None,
        }
    }
}

/// A trait for graph objects to implement so they can specify their [`ObjectKind`].
pub trait Kind {
    fn kind(&self) -> ObjectKind;
}
