/*
    gcn_dasm
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/gcn_dasm

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

use std::{collections::HashMap, io::Read, path::Path};

use crate::{error::IsaDbError, format::Format, gfx::GfxLevel, record::IsaRecord};

pub const ISA_GCN: &[u8] = include_bytes!("../isa_db/gcn.csv");

pub struct IsaDB {
    pub records: Vec<IsaRecord>,
    pub record_hash: HashMap<String, usize>,
}

#[derive(Clone, Default)]
pub struct IterFilter {
    /// Only yield opcodes that have an encoding on this generation.
    pub gfx: Option<GfxLevel>,
    /// Only yield opcodes of these formats.
    pub formats: Option<Vec<Format>>,
}

impl IterFilter {
    fn accepts(&self, record: &IsaRecord) -> bool {
        if let Some(gfx) = self.gfx {
            if record.encoding_for(gfx).is_none() {
                return false;
            }
        }
        if let Some(formats) = &self.formats {
            if !formats.contains(&record.format) {
                return false;
            }
        }
        true
    }
}

impl IsaDB {
    /// Load the opcode database compiled into the crate.
    pub fn new() -> Result<IsaDB, IsaDbError> {
        IsaDB::from_reader(ISA_GCN)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<IsaDB, IsaDbError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| IsaDbError::Csv(e.into()))?;
        IsaDB::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<IsaDB, IsaDbError> {
        let mut csv_reader = csv::ReaderBuilder::new().comment(Some(b'#')).from_reader(reader);

        let mut records: Vec<IsaRecord> = Vec::new();
        let mut record_hash: HashMap<String, usize> = HashMap::new();

        for result in csv_reader.deserialize::<IsaRecord>() {
            let mut record = result?;
            record.init()?;

            if record_hash.contains_key(&record.name) {
                return Err(IsaDbError::InvalidRecord {
                    name: record.name.clone(),
                    reason: "duplicate opcode name".into(),
                });
            }

            let index = records.len();
            record_hash.insert(record.name.clone(), index);
            records.push(record);
        }

        log::debug!("Loaded {} opcode records", records.len());
        Ok(IsaDB { records, record_hash })
    }

    pub fn opcode(&self, name: &str) -> Option<&IsaRecord> {
        self.record_hash.get(name).map(|&index| &self.records[index])
    }

    /// Index of an opcode; indices are stable for the lifetime of the database and serve as
    /// internal opcode identifiers.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.record_hash.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn opcode_iter(&self, filter: IterFilter) -> impl Iterator<Item = &IsaRecord> {
        self.records.iter().filter(move |record| filter.accepts(record))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::gfx::EncodingGroup;

    #[test]
    fn embedded_database_loads() {
        let db = IsaDB::new().expect("database ok");
        assert!(!db.is_empty());

        let add = db.opcode("s_add_u32").expect("s_add_u32 present");
        assert_eq!(add.format, Format::SOP2);
        assert_eq!(add.encoding(EncodingGroup::Gfx7), Some(0));
    }

    #[test]
    fn encodings_are_unique_per_format() {
        let db = IsaDB::new().expect("database ok");
        for group in EncodingGroup::ALL {
            let mut seen: HashSet<(Format, u16)> = HashSet::new();
            for record in &db.records {
                if let Some(op) = record.encoding(group) {
                    // FLAT, GLOBAL and SCRATCH share one encoding but not one opcode space.
                    assert!(
                        seen.insert((record.format, op)),
                        "{} reuses opcode {:#x} in {:?}",
                        record,
                        op,
                        group
                    );
                }
            }
        }
    }

    #[test]
    fn filter_by_format_and_level() {
        let db = IsaDB::new().expect("database ok");
        let filter = IterFilter {
            gfx: Some(GfxLevel::Gfx11),
            formats: Some(vec![Format::VOPD]),
        };
        let vopd: Vec<_> = db.opcode_iter(filter).collect();
        assert!(!vopd.is_empty());
        assert!(vopd.iter().all(|r| r.format == Format::VOPD));

        let filter = IterFilter {
            gfx: Some(GfxLevel::Gfx6),
            formats: Some(vec![Format::VOPD]),
        };
        assert_eq!(db.opcode_iter(filter).count(), 0);
    }

    #[test]
    fn bad_records_are_rejected() {
        let csv = "name,fmt,g7,g9,g10,g11,g12,cls,def,ops,flags\n\
                   s_bogus,SOP9,0,0,0,0,,salu,s4,s4,\n";
        assert!(IsaDB::from_reader(csv.as_bytes()).is_err());

        let csv = "name,fmt,g7,g9,g10,g11,g12,cls,def,ops,flags\n\
                   s_bogus,SOP1,,,,,,salu,s4,s4,\n";
        assert!(IsaDB::from_reader(csv.as_bytes()).is_err());

        let csv = "name,fmt,g7,g9,g10,g11,g12,cls,def,ops,flags\n\
                   s_bogus,SOP1,0,0,0,0,,salu,s4,s4,sparkly\n";
        assert!(IsaDB::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn gfx12_column_inherits_gfx11() {
        let db = IsaDB::new().expect("database ok");
        let add = db.opcode("s_add_u32").expect("s_add_u32 present");
        assert_eq!(add.encoding(EncodingGroup::Gfx12), add.encoding(EncodingGroup::Gfx11));

        let waitcnt = db.opcode("s_waitcnt").expect("s_waitcnt present");
        assert!(waitcnt.encoding_for(GfxLevel::Gfx11).is_some());
        assert!(waitcnt.encoding_for(GfxLevel::Gfx12).is_none());
        assert!(db.opcode("s_wait_loadcnt").expect("present").encoding_for(GfxLevel::Gfx12).is_some());
    }
}
