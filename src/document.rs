//! JSON dataset documents.
//!
//! A document bundles the tree with its column declarations. A bare JSON
//! array of nodes is accepted as well; its columns are inferred. Paths ending
//! in `.br` are Brotli-compressed.

use brotli::enc::BrotliEncoderParams;
use brotli::{CompressorWriter, Decompressor};
use crate::column::{infer_column_specs, Column, ColumnSpec};
use crate::error::Result;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnSpec>,
    pub data: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searchable_columns: Vec<String>,
}

impl DatasetDocument {
    pub fn new(columns: Vec<ColumnSpec>, data: Vec<Node>) -> Self {
        Self {
            columns,
            data,
            searchable_columns: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Accepts either a full document object or a bare array of nodes.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_array() {
            Ok(DatasetDocument {
                data: serde_json::from_value(value)?,
                ..Default::default()
            })
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let doc = if is_compressed(path) {
            Self::from_reader(BufReader::new(Decompressor::new(file, 4096)))?
        } else {
            Self::from_reader(BufReader::new(file))?
        };
        log::info!("loaded {} top-level rows from {}", doc.data.len(), path.display());
        Ok(doc)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        if is_compressed(path) {
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            let mut writer = CompressorWriter::with_params(file, 4096, &params);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
            writer.into_inner().flush()?;
        } else {
            let mut writer = file;
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }
        log::debug!("saved {} top-level rows to {}", self.data.len(), path.display());
        Ok(())
    }

    /// Declared column specs, or specs inferred from the top-level rows when
    /// none are declared.
    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        if self.columns.is_empty() {
            infer_column_specs(&self.data)
        } else {
            self.columns.clone()
        }
    }

    /// Columns without host renderers.
    pub fn columns(&self) -> Vec<Column> {
        self.column_specs().into_iter().map(ColumnSpec::into_column).collect()
    }
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "br")
}
