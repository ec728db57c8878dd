//! Stacks many SVG documents into one.
//!
//! The stacked document is an outer `<svg>` holding a style block and one
//! hidden `<svg:svg id="..">` fragment per input, in input order. A
//! fragment is shown when the URL targets its id, e.g. `sprites.svg#close`.
//!
//! # Example
//!
//! ```ignore
//! use stockpile::{StackBuilder, ViewBox};
//!
//! let stack = StackBuilder::new(ViewBox::new(0, 0, 24, 24))
//!     .stack_paths(&["icons/close.svg", "icons/menu.svg"])?;
//! stack.write_to_path("dist/sprites.svg")?;
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::assembler::DocumentAssembler;
use crate::error::{Result, StockpileError};
use crate::id::DocumentId;
use crate::processor::ProcessorSet;
use crate::stream::{Event, EventSink};
use crate::svg::document::{hide_embedded_svgs, svg_end, svg_start};
use crate::svg::ViewBox;

/// One embedded document in a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub id: DocumentId,
    /// File the fragment was read from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Number of events the fragment contributed.
    pub events: usize,
}

/// A stacked document, ready to be written.
#[derive(Debug, Clone)]
pub struct Stack {
    view_box: ViewBox,
    events: Vec<Event>,
    fragments: Vec<Fragment>,
}

impl Stack {
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Fragments in input order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Total number of events, including the wrapper and style block.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize the stack to `sink`.
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = EventSink::new(sink);
        for event in &self.events {
            writer.write(event).map_err(|e| StockpileError::Serialize {
                message: e.to_string(),
            })?;
        }
        writer.into_inner().flush()?;
        Ok(())
    }

    /// Serialize the stack to a file, creating parent directories.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = create_file(path)?;
        self.write(BufWriter::new(file))
    }

    /// Write a JSON index of the stacked fragments.
    pub fn write_index(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.index_json()?;
        let mut file = create_file(path)?;
        file.write_all(json.as_bytes()).map_err(|e| StockpileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write index: {}", e),
        })
    }

    /// The fragment index as pretty-printed JSON.
    pub fn index_json(&self) -> Result<String> {
        let index = StackIndex {
            view_box: self.view_box,
            fragments: &self.fragments,
        };
        serde_json::to_string_pretty(&index).map_err(|e| StockpileError::Build {
            message: format!("Failed to serialize fragment index: {}", e),
            help: None,
        })
    }
}

#[derive(Serialize)]
struct StackIndex<'a> {
    #[serde(rename = "viewBox")]
    view_box: ViewBox,
    fragments: &'a [Fragment],
}

/// Builds [`Stack`]s for a fixed view box and processor set.
#[derive(Debug, Clone)]
pub struct StackBuilder {
    view_box: ViewBox,
    assembler: DocumentAssembler,
}

impl StackBuilder {
    /// Create a builder using the default processor set.
    pub fn new(view_box: ViewBox) -> Self {
        Self::with_processors(view_box, ProcessorSet::default())
    }

    pub fn with_processors(view_box: ViewBox, processors: ProcessorSet) -> Self {
        Self {
            view_box,
            assembler: DocumentAssembler::new(processors),
        }
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Stack documents read from in-memory or already opened sources.
    ///
    /// Sources are read one after the other, in the given order.
    pub fn stack_sources<R, I>(&self, sources: I) -> Result<Stack>
    where
        R: Read,
        I: IntoIterator<Item = (DocumentId, R)>,
    {
        let mut documents = Vec::new();
        for (id, source) in sources {
            let events = self.assembler.assemble(&id, source)?;
            info!("Stacked {} XML events into #{}", events.len(), id);
            documents.push((Fragment { id, source: None, events: events.len() }, events));
        }
        Ok(self.finish(documents))
    }

    /// Stack SVG files, deriving each fragment id from the file name.
    ///
    /// Every id is derived before any file is read. Files are assembled in
    /// parallel; fragments keep the order of `paths`.
    pub fn stack_paths<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Stack> {
        let documents = paths
            .iter()
            .map(|path| path.as_ref())
            .map(|path| DocumentId::from_path(path).map(|id| (id, path)))
            .collect::<Result<Vec<_>>>()?;

        let assembled = documents
            .par_iter()
            .map(|(id, path)| self.assemble_path(id, path))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.finish(assembled))
    }

    /// Stack a single file into a one-fragment document.
    pub fn stack_path(&self, path: impl AsRef<Path>) -> Result<Stack> {
        self.stack_paths(&[path.as_ref()])
    }

    fn assemble_path(&self, id: &DocumentId, path: &Path) -> Result<(Fragment, Vec<Event>)> {
        info!("Stacking: {}", path.display());

        let file = File::open(path).map_err(|e| StockpileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;
        let events = self.assembler.assemble(id, BufReader::new(file))?;

        info!("Stacked {} XML events into #{}", events.len(), id);

        let fragment = Fragment {
            id: id.clone(),
            source: Some(path.to_path_buf()),
            events: events.len(),
        };
        Ok((fragment, events))
    }

    fn finish(&self, documents: Vec<(Fragment, Vec<Event>)>) -> Stack {
        let body: usize = documents.iter().map(|(_, events)| events.len()).sum();
        let mut events = Vec::with_capacity(body + 5);
        let mut fragments = Vec::with_capacity(documents.len());

        events.push(svg_start(&self.view_box));
        events.extend(hide_embedded_svgs());
        for (fragment, document) in documents {
            events.extend(document);
            fragments.push(fragment);
        }
        events.push(svg_end());

        Stack {
            view_box: self.view_box,
            events,
            fragments,
        }
    }
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StockpileError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    File::create(path).map_err(|e| StockpileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{EventKind, TagName};
    use crate::svg::tags::{embedded_svg_tag, style_tag, svg_tag};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const RECT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#;

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s).unwrap()
    }

    fn kinds_and_names(events: &[Event]) -> Vec<(EventKind, Option<String>)> {
        events
            .iter()
            .map(|e| (e.kind(), e.name().map(|n| n.to_string())))
            .collect()
    }

    #[test]
    fn test_zero_inputs_yield_five_events() {
        let builder = StackBuilder::new(ViewBox::new(0, 0, 500, 500));
        let stack = builder.stack_sources(Vec::<(DocumentId, &[u8])>::new()).unwrap();

        assert_eq!(stack.len(), 5);
        let events = stack.events();
        assert_eq!(events[0], svg_start(&ViewBox::new(0, 0, 500, 500)));
        assert_eq!(events[1], Event::start(style_tag(), vec![], Default::default()));
        assert_eq!(
            events[2],
            Event::characters(".i {display:none;}.i:target {display:block;}")
        );
        assert_eq!(events[3], Event::end(style_tag()));
        assert_eq!(events[4], Event::end(svg_tag()));
        assert!(stack.fragments().is_empty());
    }

    #[test]
    fn test_two_documents_in_input_order() {
        let builder = StackBuilder::new(ViewBox::default());
        let stack = builder
            .stack_sources(vec![(id("a"), RECT.as_bytes()), (id("b"), RECT.as_bytes())])
            .unwrap();

        let rect = Some("rect".to_string());
        let wrapper = Some("svg:svg".to_string());
        assert_eq!(
            kinds_and_names(stack.events()),
            vec![
                (EventKind::StartElement, Some("svg".to_string())),
                (EventKind::StartElement, Some("svg:style".to_string())),
                (EventKind::Characters, None),
                (EventKind::EndElement, Some("svg:style".to_string())),
                (EventKind::StartElement, wrapper.clone()),
                (EventKind::StartElement, rect.clone()),
                (EventKind::EndElement, rect.clone()),
                (EventKind::EndElement, wrapper.clone()),
                (EventKind::StartElement, wrapper.clone()),
                (EventKind::StartElement, rect.clone()),
                (EventKind::EndElement, rect),
                (EventKind::EndElement, wrapper),
                (EventKind::EndElement, Some("svg".to_string())),
            ]
        );

        let ids: Vec<&str> = stack
            .events()
            .iter()
            .filter(|e| e.name() == Some(&embedded_svg_tag()))
            .filter_map(|e| e.as_start())
            .filter_map(|s| s.attribute(&TagName::local("id")))
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_ids_are_not_rejected() {
        let builder = StackBuilder::new(ViewBox::default());
        let stack = builder
            .stack_sources(vec![(id("a"), RECT.as_bytes()), (id("a"), RECT.as_bytes())])
            .unwrap();

        assert_eq!(stack.fragments().len(), 2);
        assert_eq!(stack.fragments()[0].id, stack.fragments()[1].id);
    }

    #[test]
    fn test_malformed_input_aborts_run() {
        let builder = StackBuilder::new(ViewBox::default());
        let result = builder.stack_sources(vec![
            (id("a"), RECT.as_bytes()),
            (id("b"), "<svg><rect></svg>".as_bytes()),
        ]);

        assert!(matches!(result, Err(StockpileError::MalformedXml { .. })));
    }

    #[test]
    fn test_stack_paths_preserves_order_and_derives_ids() {
        let dir = tempdir().unwrap();
        let names = ["zeta", "alpha", "mid", "beta"];
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|name| {
                let path = dir.path().join(format!("{}.svg", name));
                fs::write(&path, RECT).unwrap();
                path
            })
            .collect();

        let stack = StackBuilder::new(ViewBox::default()).stack_paths(&paths).unwrap();
        let ids: Vec<&str> = stack.fragments().iter().map(|f| f.id.as_str()).collect();

        assert_eq!(ids, names);
        assert_eq!(stack.fragments()[0].source.as_deref(), Some(paths[0].as_path()));
        assert_eq!(stack.fragments()[0].events, 4);
        assert_eq!(stack.len(), 5 + 4 * names.len());
    }

    #[test]
    fn test_stack_paths_rejects_underivable_id_before_reading() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.svg");
        fs::write(&good, RECT).unwrap();

        let result = StackBuilder::new(ViewBox::default())
            .stack_paths(&[good, dir.path().join(".svg")]);

        assert!(matches!(result, Err(StockpileError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_stack_paths_missing_file() {
        let dir = tempdir().unwrap();
        let result = StackBuilder::new(ViewBox::default())
            .stack_path(dir.path().join("missing.svg"));

        assert!(matches!(result, Err(StockpileError::Io { .. })));
    }

    #[test]
    fn test_write_produces_well_formed_document() {
        let stack = StackBuilder::new(ViewBox::new(0, 0, 24, 24))
            .stack_sources(vec![(id("close"), RECT.as_bytes())])
            .unwrap();

        let mut output = Vec::new();
        stack.write(&mut output).unwrap();
        let xml = String::from_utf8(output).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"viewBox="0 0 24 24""#));
        assert!(xml.contains(r#"<svg:svg id="close" class="i">"#));
        assert!(xml.contains(".i {display:none;}.i:target {display:block;}"));

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.attribute("width"), Some("24"));
    }

    #[test]
    fn test_write_to_path_creates_directories() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("dist/nested/sprites.svg");

        let stack = StackBuilder::new(ViewBox::default())
            .stack_sources(vec![(id("a"), RECT.as_bytes())])
            .unwrap();
        stack.write_to_path(&output).unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_index_json() {
        let stack = StackBuilder::new(ViewBox::new(0, 0, 16, 16))
            .stack_sources(vec![(id("a"), RECT.as_bytes()), (id("b"), RECT.as_bytes())])
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&stack.index_json().unwrap()).unwrap();

        assert_eq!(parsed["viewBox"], "0 0 16 16");
        assert_eq!(parsed["fragments"][0]["id"], "a");
        assert_eq!(parsed["fragments"][1]["id"], "b");
        assert_eq!(parsed["fragments"][1]["events"], 4);
        assert!(parsed["fragments"][0].get("source").is_none());
    }
}
