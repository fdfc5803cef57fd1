//! Shared helpers for paciente-extractor integration tests.
//!
//! - `build_pdf` writes real PDFs with `lopdf`, one text object per line
//! - `TestHarness` keeps inputs in an isolated temp directory

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object, Stream};
use tempfile::TempDir;

use paciente_extractor::{default_config, FieldsConfig, Outcome, Pipeline};

/// Builds a PDF with one page per entry of `pages`.
///
/// Lines must stay within printable ASCII without parentheses or backslashes.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut content = String::new();
        for (i, line) in lines.iter().enumerate() {
            content.push_str(&format!(
                "BT /F1 11 Tf 72 {} Td ({}) Tj ET\n",
                720 - (i as i64) * 14,
                line
            ));
        }

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize PDF");
    bytes
}

/// Isolated directory for test inputs.
pub struct TestHarness {
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(filename);
        std::fs::write(&path, content).expect("Failed to write input file");
        path
    }

    pub fn write_pdf(&self, filename: &str, pages: &[&[&str]]) -> PathBuf {
        self.write_input(filename, &build_pdf(pages))
    }

    pub fn default_pipeline(&self) -> Pipeline {
        Pipeline::new(&default_config().expect("default config")).expect("default pipeline")
    }

    pub fn pipeline(&self, config: &FieldsConfig) -> Pipeline {
        Pipeline::new(config).expect("pipeline from config")
    }

    /// Runs the default pipeline and returns the printed JSON line.
    pub fn extract_json(&self, path: &Path) -> String {
        self.default_pipeline()
            .run(path)
            .to_json()
            .expect("serializable outcome")
    }

    pub fn extract(&self, path: &Path) -> Outcome {
        self.default_pipeline().run(path)
    }
}
