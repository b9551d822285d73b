//! Entity module - plain data records owned by the partition store.
//! Sectors are the only stored entity; angles are derived on demand.

pub mod sector;

pub use sector::{NewSector, Sector, SectorUpdate, SectorWithAngles};
