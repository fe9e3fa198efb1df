// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::io::BufRead;

use strata_digest::{Digest, Hasher};
use strum::Display;

use super::blob::Blob;
use super::encoding::{Decodable, Encodable};
use super::kind::{Kind, ObjectKind};
use super::layer::Layer;
use super::manifest::Manifest;
use super::platform::Platform;
use super::tree::Tree;
use crate::{Error, Result};

const OBJECT_HEADER: &[u8] = b"--STRATA--";

/// The sum type over every kind of object storable in the object database.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Manifest(Manifest),
    Layer(Layer),
    Platform(Platform),
    Mask,
}

impl Kind for Object {
    fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Manifest(_) => ObjectKind::Manifest,
            Object::Layer(_) => ObjectKind::Layer,
            Object::Platform(_) => ObjectKind::Platform,
            Object::Mask => ObjectKind::Mask,
        }
    }
}

impl Object {
    /// The object's identity: the digest of its canonical encoding, with
    /// the one-byte kind tag prepended.
    pub fn digest(&self) -> Result<Digest> {
        let mut hasher = Hasher::default();
        self.encode(&mut hasher)?;
        Ok(hasher.digest())
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Object::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_manifest(&self) -> Option<&Manifest> {
        match self {
            Object::Manifest(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match self {
            Object::Layer(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_platform(&self) -> Option<&Platform> {
        match self {
            Object::Platform(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Blob> for Object {
    fn from(v: Blob) -> Self {
        Object::Blob(v)
    }
}
impl From<Tree> for Object {
    fn from(v: Tree) -> Self {
        Object::Tree(v)
    }
}
impl From<Manifest> for Object {
    fn from(v: Manifest) -> Self {
        Object::Manifest(v)
    }
}
impl From<Layer> for Object {
    fn from(v: Layer) -> Self {
        Object::Layer(v)
    }
}
impl From<Platform> for Object {
    fn from(v: Platform) -> Self {
        Object::Platform(v)
    }
}

impl Encodable for Object {
    fn encode(&self, writer: &mut impl std::io::Write) -> Result<()> {
        strata_digest::write_header(&mut *writer, OBJECT_HEADER)?;
        strata_digest::write_u8(&mut *writer, self.kind() as u8)?;
        match self {
            Object::Blob(o) => o.encode(writer),
            Object::Tree(o) => o.encode(writer),
            Object::Manifest(o) => o.encode(writer),
            Object::Layer(o) => o.encode(writer),
            Object::Platform(o) => o.encode(writer),
            Object::Mask => Ok(()),
        }
    }
}

impl Decodable for Object {
    fn decode(reader: &mut impl BufRead) -> Result<Self> {
        strata_digest::consume_header(&mut *reader, OBJECT_HEADER)?;
        let kind_tag = strata_digest::read_u8(&mut *reader)?;
        match ObjectKind::from_u8(kind_tag) {
            Some(ObjectKind::Blob) => Ok(Object::Blob(Blob::decode(reader)?)),
            Some(ObjectKind::Tree) => Ok(Object::Tree(Tree::decode(reader)?)),
            Some(ObjectKind::Manifest) => Ok(Object::Manifest(Manifest::decode(reader)?)),
            Some(ObjectKind::Layer) => Ok(Object::Layer(Layer::decode(reader)?)),
            Some(ObjectKind::Platform) => Ok(Object::Platform(Platform::decode(reader)?)),
            Some(ObjectKind::Mask) => Ok(Object::Mask),
            None => Err(Error::String(format!(
                "cannot decode object: unknown kind tag {kind_tag}"
            ))),
        }
    }
}
