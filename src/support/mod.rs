//! # Capability Registry
//!
//! `BenchSupport` records, for one payload kind, which libraries are active
//! and which APIs each library supports. The harness consults it before
//! interpreting a missing result: support is an explicit flag here, never
//! inferred from the absence of output.
//!
//! ```ignore
//! let mut support = BenchSupport::for_kind(DataKind::Users);
//! support.unsupport(Library::SimdJson, Api::Serialize);
//! support.deactivate(Library::Cbor);
//!
//! assert!(!support.supports(Library::SimdJson, Api::Serialize));
//! ```

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::codec::{Api, Library};
use crate::model::DataKind;

/// One library with its activation flag and supported APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibApi {
    lib: Library,
    active: bool,
    apis: SmallVec<[Api; 2]>,
}

impl LibApi {
    pub fn new(lib: Library, apis: impl IntoIterator<Item = Api>) -> Self {
        Self {
            lib,
            active: true,
            apis: apis.into_iter().collect(),
        }
    }

    pub fn lib(&self) -> Library {
        self.lib
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn apis(&self) -> &[Api] {
        &self.apis
    }

    pub fn contains(&self, api: Api) -> bool {
        self.apis.contains(&api)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSupport {
    kind: DataKind,
    libapis: Vec<LibApi>,
}

impl BenchSupport {
    /// Registry with every library that has a schema for `kind`, active and
    /// supporting both APIs. Libraries without a schema are absent.
    pub fn for_kind(kind: DataKind) -> Self {
        let libapis = Library::ALL
            .into_iter()
            .filter(|lib| lib.kinds().contains(&kind))
            .map(|lib| LibApi::new(lib, Api::ALL))
            .collect();
        Self { kind, libapis }
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    pub fn libapis(&self) -> &[LibApi] {
        &self.libapis
    }

    fn entry_mut(&mut self, lib: Library) -> Option<&mut LibApi> {
        self.libapis.iter_mut().find(|entry| entry.lib == lib)
    }

    /// Keeps `lib` registered but marks it inactive.
    pub fn deactivate(&mut self, lib: Library) -> &mut Self {
        if let Some(entry) = self.entry_mut(lib) {
            entry.active = false;
        }
        self
    }

    pub fn activate(&mut self, lib: Library) -> &mut Self {
        if let Some(entry) = self.entry_mut(lib) {
            entry.active = true;
        }
        self
    }

    /// Declares that `lib` cannot perform `api` for this payload kind.
    pub fn unsupport(&mut self, lib: Library, api: Api) -> &mut Self {
        if let Some(entry) = self.entry_mut(lib) {
            entry.apis.retain(|a| *a != api);
        }
        self
    }

    /// Deactivates every library not in `libs`.
    pub fn restrict_to(&mut self, libs: &[Library]) -> &mut Self {
        let keep: HashSet<Library> = libs.iter().copied().collect();
        for entry in &mut self.libapis {
            entry.active = keep.contains(&entry.lib);
        }
        self
    }

    pub fn is_registered(&self, lib: Library) -> bool {
        self.libapis.iter().any(|entry| entry.lib == lib)
    }

    pub fn is_active(&self, lib: Library) -> bool {
        self.libapis
            .iter()
            .any(|entry| entry.lib == lib && entry.active)
    }

    /// True when `lib` is registered, active and declares `api`.
    pub fn supports(&self, lib: Library, api: Api) -> bool {
        self.libapis
            .iter()
            .any(|entry| entry.lib == lib && entry.active && entry.contains(api))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_registry_holds_every_library() {
        let support = BenchSupport::for_kind(DataKind::Users);

        assert_eq!(support.libapis().len(), Library::ALL.len());
        for lib in Library::ALL {
            assert!(support.supports(lib, Api::Serialize));
            assert!(support.supports(lib, Api::Deserialize));
        }
    }

    #[test]
    fn clients_registry_omits_schema_libraries() {
        let support = BenchSupport::for_kind(DataKind::Clients);

        assert!(!support.is_registered(Library::Protobuf));
        assert!(!support.is_registered(Library::FlatBuffers));
        assert!(!support.supports(Library::FlatBuffers, Api::Serialize));
        assert!(support.supports(Library::Cbor, Api::Deserialize));
    }

    #[test]
    fn unsupport_removes_one_api() {
        let mut support = BenchSupport::for_kind(DataKind::Users);
        support.unsupport(Library::SimdJson, Api::Serialize);

        assert!(!support.supports(Library::SimdJson, Api::Serialize));
        assert!(support.supports(Library::SimdJson, Api::Deserialize));
        assert!(support.is_active(Library::SimdJson));
    }

    #[test]
    fn deactivated_library_supports_nothing() {
        let mut support = BenchSupport::for_kind(DataKind::Users);
        support.deactivate(Library::Bincode);

        assert!(!support.is_active(Library::Bincode));
        assert!(support.is_registered(Library::Bincode));
        assert!(!support.supports(Library::Bincode, Api::Serialize));

        support.activate(Library::Bincode);
        assert!(support.supports(Library::Bincode, Api::Serialize));
    }

    #[test]
    fn restrict_to_deactivates_the_rest() {
        let mut support = BenchSupport::for_kind(DataKind::Users);
        support.restrict_to(&[Library::SerdeJson, Library::FlatBuffers]);

        let active: Vec<Library> = support
            .libapis()
            .iter()
            .filter(|entry| entry.active())
            .map(LibApi::lib)
            .collect();
        assert_eq!(active, vec![Library::SerdeJson, Library::FlatBuffers]);
    }
}
