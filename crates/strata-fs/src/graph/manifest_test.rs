// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::collections::HashMap;

use rstest::rstest;
use strata_digest::Digest;

use super::*;
use crate::graph::{Blob, Database, DigestSearchCriteria, Entry, EntryKind, Object};
use crate::Result;

#[derive(Default)]
struct MemDb {
    objects: RefCell<HashMap<Digest, Object>>,
}

impl Database for MemDb {
    fn read_object(&self, digest: &Digest) -> Result<Object> {
        self.objects
            .borrow()
            .get(digest)
            .cloned()
            .ok_or_else(|| crate::Error::UnknownObject(*digest))
    }

    fn write_object(&self, obj: &Object) -> Result<Digest> {
        let digest = obj.digest()?;
        self.objects.borrow_mut().insert(digest, obj.clone());
        Ok(digest)
    }

    fn remove_object(&self, digest: &Digest) -> Result<()> {
        self.objects.borrow_mut().remove(digest);
        Ok(())
    }

    fn find_digests(
        &self,
        _criteria: DigestSearchCriteria,
    ) -> Result<Box<dyn Iterator<Item = Result<Digest>> + '_>> {
        let digests: Vec<_> = self.objects.borrow().keys().copied().collect();
        Ok(Box::new(digests.into_iter().map(Ok)))
    }
}

fn blob_entry(db: &MemDb, name: &str, content: &[u8]) -> Entry {
    let blob = Blob::new(Digest::from_reader(content).unwrap(), content.len() as u64);
    let object_digest = db.write_object(&Object::Blob(blob)).unwrap();
    Entry {
        name: name.to_string(),
        kind: EntryKind::Blob,
        mode: 0o100644,
        size: content.len() as u64,
        object: object_digest,
    }
}

#[rstest]
fn test_manifest_walk_visits_nested_entries() {
    let db = MemDb::default();
    let child_tree = Tree::from_entries([blob_entry(&db, "inner.txt", b"hello")]).unwrap();
    let child_digest = db.write_object(&Object::Tree(child_tree)).unwrap();

    let root_entry = Entry {
        name: "subdir".to_string(),
        kind: EntryKind::Tree,
        mode: 0o40755,
        size: 0,
        object: child_digest,
    };
    let root_tree = Tree::from_entries([root_entry, blob_entry(&db, "top.txt", b"world")]).unwrap();
    let root_digest = db.write_object(&Object::Tree(root_tree)).unwrap();

    let manifest = Manifest::new(root_digest, vec![child_digest]);
    let walked = manifest.walk(&db).unwrap();
    let paths: Vec<_> = walked.iter().map(|(p, _)| p.as_str()).collect();
    assert!(paths.contains(&"subdir/inner.txt"));
    assert!(paths.contains(&"top.txt"));
}

#[rstest]
fn test_manifest_round_trip_through_encoding() {
    let a = Digest::from_reader("a".as_bytes()).unwrap();
    let b = Digest::from_reader("b".as_bytes()).unwrap();
    let manifest = Manifest::new(a, vec![b]);
    let bytes = manifest.encode_to_bytes().unwrap();
    let mut reader = std::io::BufReader::new(bytes.as_slice());
    let decoded = Manifest::decode(&mut reader).unwrap();
    assert_eq!(manifest, decoded);
}
