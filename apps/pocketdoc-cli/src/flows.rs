//! One method per user flow
//!
//! The flows pick the output name, call into the crates and hand back what
//! the terminal should show. Failures carry context for the single-line
//! report printed by `main`.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use chrono::Local;
use library_core::{format_size, PdfLibrary};
use shared_types::{CompressionQuality, CompressionStats, ManagedFile, OutputKind, SavedSignature};
use signature_store::{FileStore, SignatureStore};
use std::fs;
use std::path::{Path, PathBuf};
use transform_core::html::{data_uri, image_mime};
use transform_core::HtmlRenderer;

/// Where the signature image for a signing comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureSource {
    File(PathBuf),
    Saved(String),
}

/// Result of a signing
#[derive(Debug, Clone)]
pub struct Signed {
    pub path: PathBuf,
    /// Set when the signature was also kept for reuse
    pub saved: Option<SavedSignature>,
}

pub struct App {
    library: PdfLibrary,
    signatures: SignatureStore<FileStore>,
    renderer: Box<dyn HtmlRenderer>,
    default_page_count: u32,
}

impl App {
    pub fn new(
        library: PdfLibrary,
        signatures: SignatureStore<FileStore>,
        renderer: Box<dyn HtmlRenderer>,
        default_page_count: u32,
    ) -> Self {
        Self {
            library,
            signatures,
            renderer,
            default_page_count,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let library = PdfLibrary::new(config.library.resolve_directory()?);
        let store = FileStore::new(config.signatures.resolve_directory()?);
        tracing::debug!(
            "Library at {}, signatures at {}",
            library.dir().display(),
            store.dir().display()
        );
        Ok(Self::new(
            library,
            SignatureStore::new(store),
            config.renderer.build(),
            config.split.default_page_count,
        ))
    }

    /// A bare file name that is not in the working directory refers to a
    /// library entry; anything else is taken as given.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let bare = path.components().count() == 1 && path.parent() == Some(Path::new(""));
        if bare && !path.exists() {
            return self.library.dir().join(path);
        }
        path.to_path_buf()
    }

    fn existing(&self, path: &Path) -> Result<PathBuf> {
        let path = self.resolve(path);
        if !path.is_file() {
            bail!("{} does not exist", path.display());
        }
        Ok(path)
    }

    pub fn list_files(&self) -> Result<Vec<ManagedFile>> {
        Ok(self.library.list_files()?)
    }

    pub fn delete_file(&self, path: &Path) -> Result<PathBuf> {
        let path = self.resolve(path);
        self.library.delete_file(&path)?;
        Ok(path)
    }

    pub fn rename_file(&self, path: &Path, new_name: &str) -> Result<PathBuf> {
        let path = self.resolve(path);
        Ok(self.library.rename_file(&path, new_name)?)
    }

    /// `kind` is [`OutputKind::Scan`] or [`OutputKind::Converted`]
    pub fn images_to_pdf(&self, kind: OutputKind, images: &[PathBuf]) -> Result<PathBuf> {
        let dest = self.library.output_path(kind)?;
        transform_core::images_to_pdf(self.renderer.as_ref(), images, &dest)?;
        Ok(dest)
    }

    pub fn merge(&self, pdfs: &[PathBuf]) -> Result<PathBuf> {
        let pdfs: Vec<PathBuf> = pdfs.iter().map(|p| self.resolve(p)).collect();
        let dest = self.library.output_path(OutputKind::Merged)?;
        transform_core::merge_pdfs(self.renderer.as_ref(), &pdfs, &dest)?;
        Ok(dest)
    }

    /// Page count: `probe` reads it from the file, otherwise `page_count`,
    /// otherwise the configured default.
    pub fn split(
        &self,
        pdf: &Path,
        ranges: &str,
        page_count: Option<u32>,
        probe: bool,
    ) -> Result<Vec<PathBuf>> {
        let src = self.existing(pdf)?;
        let page_count = if probe {
            match transform_core::probe_page_count_file(&src)? {
                Some(count) => {
                    tracing::info!("{} has {} page(s)", src.display(), count);
                    count
                }
                None => bail!("could not read a page count from {}", src.display()),
            }
        } else {
            page_count.unwrap_or(self.default_page_count)
        };

        let dir = self.library.ensure_directory()?;
        Ok(transform_core::split_by_range_input(
            self.renderer.as_ref(),
            &src,
            ranges,
            page_count,
            &dir,
        )?)
    }

    pub fn extract(&self, pdf: &Path, pages: &[u32]) -> Result<PathBuf> {
        let src = self.existing(pdf)?;
        let dest = self.library.output_path(OutputKind::Extracted)?;
        transform_core::extract_pages(self.renderer.as_ref(), &src, pages, &dest)?;
        Ok(dest)
    }

    pub fn compress(
        &self,
        pdf: &Path,
        quality: CompressionQuality,
    ) -> Result<(PathBuf, CompressionStats)> {
        let src = self.existing(pdf)?;
        let dest = self.library.output_path(OutputKind::Compressed)?;
        let stats = transform_core::compress_pdf(self.renderer.as_ref(), &src, quality, &dest)?;
        Ok((dest, stats))
    }

    /// Sign `pdf`. With `save`, a file signature is also kept under the
    /// given name (blank means "Signature N").
    pub fn sign(
        &mut self,
        pdf: &Path,
        source: &SignatureSource,
        save: Option<&str>,
    ) -> Result<Signed> {
        let src = self.existing(pdf)?;
        let original_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let data = match source {
            SignatureSource::File(image) => {
                let bytes = fs::read(image)
                    .with_context(|| format!("read signature {}", image.display()))?;
                data_uri(image_mime(image), &bytes)
            }
            SignatureSource::Saved(id) => match self.signatures.get(id)? {
                Some(signature) => signature.data,
                None => bail!("no saved signature with id {}", id),
            },
        };

        let dest = self.library.output_path(OutputKind::Signed)?;
        transform_core::sign_pdf(self.renderer.as_ref(), &original_name, &data, &dest)?;

        let saved = match (save, source) {
            (Some(name), SignatureSource::File(_)) => Some(
                self.signatures
                    .save(name, &data)
                    .context("save signature")?,
            ),
            _ => None,
        };

        Ok(Signed { path: dest, saved })
    }

    pub fn list_signatures(&self) -> Result<Vec<SavedSignature>> {
        Ok(self.signatures.list()?)
    }

    pub fn delete_signature(&mut self, id: &str) -> Result<bool> {
        Ok(self.signatures.delete(id)?)
    }
}

/// One line per file: name, size, local modification time
pub fn format_listing(files: &[ManagedFile]) -> String {
    let width = files.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    files
        .iter()
        .map(|f| {
            format!(
                "{:<width$}  {:>9}  {}\n",
                f.name,
                format_size(f.size),
                f.modified.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                width = width
            )
        })
        .collect()
}

pub fn format_signatures(signatures: &[SavedSignature]) -> String {
    signatures
        .iter()
        .map(|s| format!("{}  {}\n", s.id, s.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use transform_core::PassthroughRenderer;

    struct Fixture {
        tmp: TempDir,
        app: App,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let app = App::new(
            PdfLibrary::new(tmp.path().join("pdfs")),
            SignatureStore::new(FileStore::new(tmp.path().join("store"))),
            Box::new(PassthroughRenderer::in_dir(tmp.path().join("scratch"))),
            5,
        );
        Fixture { tmp, app }
    }

    impl Fixture {
        fn input(&self, name: &str, bytes: &[u8]) -> PathBuf {
            let dir = self.tmp.path().join("inputs");
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join(name);
            fs::write(&path, bytes).unwrap();
            path
        }
    }

    fn name_of(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn test_scan_and_convert_prefixes() {
        let fx = fixture();
        let img = fx.input("page.jpg", b"jpeg");

        let scan = fx.app.images_to_pdf(OutputKind::Scan, &[img.clone()]).unwrap();
        let converted = fx.app.images_to_pdf(OutputKind::Converted, &[img]).unwrap();

        assert!(name_of(&scan).starts_with("scan_"));
        assert!(name_of(&converted).starts_with("converted_"));
        assert_eq!(fx.app.list_files().unwrap().len(), 2);
    }

    #[test]
    fn test_bare_names_resolve_into_library() {
        let fx = fixture();
        let img = fx.input("page.png", b"png");
        let made = fx.app.images_to_pdf(OutputKind::Converted, &[img]).unwrap();
        let bare = PathBuf::from(name_of(&made));

        assert_eq!(fx.app.resolve(&bare), made);
        assert_eq!(
            fx.app.resolve(Path::new("missing.pdf")),
            fx.tmp.path().join("pdfs").join("missing.pdf")
        );
        // Paths with directories pass through
        let nested = Path::new("some/dir/x.pdf");
        assert_eq!(fx.app.resolve(nested), nested.to_path_buf());

        let renamed = fx.app.rename_file(&bare, "Receipt").unwrap();
        assert_eq!(name_of(&renamed), "Receipt.pdf");
        fx.app.delete_file(Path::new("Receipt.pdf")).unwrap();
        assert!(fx.app.list_files().unwrap().is_empty());
        // Deleting again is still fine
        fx.app.delete_file(Path::new("Receipt.pdf")).unwrap();
    }

    #[test]
    fn test_files_commands_stay_inside_library() {
        let fx = fixture();
        let outside = fx.input("thesis.docx", b"years of work");

        let err = fx.app.delete_file(&outside).unwrap_err();
        assert!(format!("{:#}", err).contains("is not a PDF in the library"));
        assert!(err.to_string().contains("thesis.docx"));

        let err = fx.app.rename_file(&outside, "moved").unwrap_err();
        assert!(format!("{:#}", err).contains("is not a PDF in the library"));
        assert!(outside.exists());
    }

    #[test]
    fn test_split_uses_default_page_count() {
        let fx = fixture();
        let pdf = fx.input("doc.pdf", b"%PDF");

        let paths = fx.app.split(&pdf, "1-2, 5, 6", None, false).unwrap();
        assert_eq!(paths.len(), 2);

        let paths = fx.app.split(&pdf, "6-8", Some(10), false).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_split_rejects_nothing_valid() {
        let fx = fixture();
        let pdf = fx.input("doc.pdf", b"%PDF");
        let err = fx.app.split(&pdf, "9", None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("No valid page ranges"));
        assert!(fx.app.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_split_probe_needs_readable_pdf() {
        let fx = fixture();
        let pdf = fx.input("doc.pdf", b"not a pdf");
        let err = fx.app.split(&pdf, "1", None, true).unwrap_err();
        assert!(format!("{:#}", err).contains("could not read a page count"));
    }

    #[test]
    fn test_missing_source_is_reported() {
        let fx = fixture();
        let err = fx.app.extract(Path::new("ghost.pdf"), &[1]).unwrap_err();
        assert!(format!("{:#}", err).contains("ghost.pdf does not exist"));
    }

    #[test]
    fn test_compress_reports_stats() {
        let fx = fixture();
        let pdf = fx.input("big.pdf", &[b'x'; 4096]);
        let (dest, stats) = fx.app.compress(&pdf, CompressionQuality::Low).unwrap();

        assert!(name_of(&dest).starts_with("compressed_"));
        assert_eq!(stats.original_size, 4096);
        assert_eq!(stats.compressed_size, fs::metadata(&dest).unwrap().len());
    }

    #[test]
    fn test_sign_saves_then_reuses_signature() {
        let mut fx = fixture();
        let pdf = fx.input("lease.pdf", b"%PDF");
        let sig = fx.input("sig.png", b"ink");

        let first = fx
            .app
            .sign(&pdf, &SignatureSource::File(sig), Some(""))
            .unwrap();
        let saved = first.saved.unwrap();
        assert_eq!(saved.name, "Signature 1");
        assert!(saved.data.starts_with("data:image/png;base64,"));
        assert!(fs::read_to_string(&first.path)
            .unwrap()
            .contains("Original: lease.pdf"));

        let second = fx
            .app
            .sign(&pdf, &SignatureSource::Saved(saved.id.clone()), Some("x"))
            .unwrap();
        assert!(second.saved.is_none());
        assert_eq!(fx.app.list_signatures().unwrap().len(), 1);

        assert!(fx.app.delete_signature(&saved.id).unwrap());
        assert!(!fx.app.delete_signature(&saved.id).unwrap());
    }

    #[test]
    fn test_sign_unknown_saved_id() {
        let mut fx = fixture();
        let pdf = fx.input("lease.pdf", b"%PDF");
        let err = fx
            .app
            .sign(&pdf, &SignatureSource::Saved("nope".into()), None)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("no saved signature"));
        assert!(fx.app.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_format_listing_aligns_columns() {
        let files = vec![
            ManagedFile {
                name: "a.pdf".into(),
                path: PathBuf::from("a.pdf"),
                size: 512,
                modified: chrono::Utc::now(),
            },
            ManagedFile {
                name: "longer.pdf".into(),
                path: PathBuf::from("longer.pdf"),
                size: 2048,
                modified: chrono::Utc::now(),
            },
        ];
        let out = format_listing(&files);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("a.pdf       "));
        assert!(lines[0].contains("512 B"));
        assert!(lines[1].contains("2.0 KB"));
    }
}
