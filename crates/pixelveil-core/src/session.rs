//! Session context for interactive front-ends.
//!
//! A [`Session`] holds what a user has chosen so far: the loaded image (and
//! where it came from) and the current key. Front-ends own one session and
//! pass it to their handlers; the transforms themselves stay stateless.

use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{self, DecodeError, PixelGrid, PREVIEW_MAX_EDGE};
use crate::encode::{self, EncodeError};
use crate::transform::TransformError;
use crate::{Action, Key, DEFAULT_KEY};

/// Errors surfaced to the user by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An action was requested before any image was loaded.
    #[error("No image loaded; load an image first")]
    NoImageLoaded,

    /// Key input was not a whole number.
    #[error("Invalid key '{0}': expected a whole number")]
    InvalidKey(String),

    /// Key input was a whole number too large in magnitude to store.
    #[error(
        "Key '{0}' is out of range: keys must lie between {min} and {max}",
        min = Key::MIN,
        max = Key::MAX
    )]
    KeyOutOfRange(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Parse user key input. Surrounding whitespace is ignored.
pub fn parse_key(input: &str) -> Result<Key, SessionError> {
    let trimmed = input.trim();
    trimmed.parse::<Key>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            SessionError::KeyOutOfRange(trimmed.to_string())
        }
        _ => SessionError::InvalidKey(trimmed.to_string()),
    })
}

#[derive(Debug, Clone)]
struct LoadedImage {
    path: PathBuf,
    image: PixelGrid,
}

/// Result of running an action: the transformed image, its preview and
/// where it was written.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub action: Action,
    pub image: PixelGrid,
    pub preview: PixelGrid,
    pub output_path: PathBuf,
}

impl ActionOutcome {
    /// Confirmation message naming the output path.
    pub fn notice(&self) -> String {
        format!(
            "Image {} and saved as '{}'",
            self.action.label(),
            self.output_path.display()
        )
    }
}

/// The loaded image and current key of one interactive user.
#[derive(Debug, Clone)]
pub struct Session {
    loaded: Option<LoadedImage>,
    key: Key,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session with [`DEFAULT_KEY`].
    pub fn new() -> Self {
        Self::with_key(DEFAULT_KEY)
    }

    pub fn with_key(key: Key) -> Self {
        Self { loaded: None, key }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    /// Parse and store a key typed by the user. On error the current key is kept.
    pub fn set_key_input(&mut self, input: &str) -> Result<Key, SessionError> {
        let key = parse_key(input)?;
        self.key = key;
        Ok(key)
    }

    /// Load an image from disk, replacing the current one.
    ///
    /// If decoding fails the previously loaded image stays in place.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&PixelGrid, SessionError> {
        let path = path.as_ref();
        let image = decode::load_image(path)?;
        log::debug!("loaded {}", path.display());
        let loaded = self.loaded.insert(LoadedImage {
            path: path.to_path_buf(),
            image,
        });
        Ok(&loaded.image)
    }

    /// Adopt an already decoded image as if it had been loaded from `path`.
    pub fn load_decoded(&mut self, path: impl Into<PathBuf>, image: PixelGrid) {
        self.loaded = Some(LoadedImage {
            path: path.into(),
            image,
        });
    }

    pub fn image(&self) -> Option<&PixelGrid> {
        self.loaded.as_ref().map(|l| &l.image)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// Run an action on the loaded image with the current key, without saving.
    pub fn apply(&self, action: Action) -> Result<PixelGrid, SessionError> {
        let loaded = self.loaded.as_ref().ok_or_else(|| {
            log::warn!("{action} ignored: no image loaded");
            SessionError::NoImageLoaded
        })?;
        Ok(action.apply(&loaded.image, self.key)?)
    }

    /// Run an action, build its preview and save the result next to the
    /// source image as `{action}_image.png`.
    ///
    /// With no image loaded nothing is transformed or written.
    pub fn run(&self, action: Action) -> Result<ActionOutcome, SessionError> {
        let image = self.apply(action)?;
        let source = self.source_path().ok_or(SessionError::NoImageLoaded)?;

        let preview = decode::generate_preview(&image, PREVIEW_MAX_EDGE)?;
        let output_path = encode::output_path(source, action);
        encode::save_png(&image, &output_path)?;

        Ok(ActionOutcome {
            action,
            image,
            preview,
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{load_image, ChannelLayout};
    use crate::encode::save_png;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pixelveil-session-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_image() -> PixelGrid {
        PixelGrid::from_gray_rows(&[&[10, 20], &[30, 40]])
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.key(), 42);
        assert!(session.image().is_none());
        assert!(session.source_path().is_none());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("5").unwrap(), 5);
        assert_eq!(parse_key("  -17 \n").unwrap(), -17);
        assert!(matches!(parse_key("4.2"), Err(SessionError::InvalidKey(_))));
        assert!(matches!(parse_key("abc"), Err(SessionError::InvalidKey(_))));
        assert!(matches!(parse_key(""), Err(SessionError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_key_out_of_range() {
        let err = parse_key("300000000000000000000").unwrap_err();
        assert!(matches!(err, SessionError::KeyOutOfRange(_)));
        assert!(!err.to_string().contains("expected a whole number"), "{err}");
        assert!(err.to_string().contains("out of range"), "{err}");

        assert!(matches!(
            parse_key("-9223372036854775809"),
            Err(SessionError::KeyOutOfRange(_))
        ));
        assert_eq!(parse_key("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_key("-9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn test_invalid_key_input_keeps_key() {
        let mut session = Session::with_key(7);
        assert!(session.set_key_input("seven").is_err());
        assert_eq!(session.key(), 7);

        assert_eq!(session.set_key_input("9").unwrap(), 9);
        assert_eq!(session.key(), 9);
    }

    #[test]
    fn test_action_without_image_is_noop() {
        let session = Session::new();
        for action in Action::ALL {
            assert!(matches!(session.apply(action), Err(SessionError::NoImageLoaded)));
            assert!(matches!(session.run(action), Err(SessionError::NoImageLoaded)));
        }
    }

    #[test]
    fn test_apply_uses_current_key() {
        let mut session = Session::with_key(5);
        session.load_decoded("/nowhere/source.png", sample_image());

        let enc = session.apply(Action::Encrypt).unwrap();
        assert_eq!(enc.samples, vec![15, 25, 35, 45]);

        session.set_key(1);
        let enc = session.apply(Action::Encrypt).unwrap();
        assert_eq!(enc.samples, vec![11, 21, 31, 41]);
    }

    #[test]
    fn test_run_saves_next_to_source() {
        let dir = scratch_dir("run");
        let source = dir.join("input.png");
        save_png(&sample_image(), &source).unwrap();

        let mut session = Session::with_key(5);
        session.load(&source).unwrap();
        let outcome = session.run(Action::Encrypt).unwrap();

        assert_eq!(outcome.output_path, dir.join("encrypted_image.png"));
        assert_eq!(outcome.image.samples, vec![15, 25, 35, 45]);
        assert_eq!(outcome.preview, outcome.image);
        assert_eq!(load_image(&outcome.output_path).unwrap(), outcome.image);
        assert_eq!(
            outcome.notice(),
            format!("Image encrypted and saved as '{}'", outcome.output_path.display())
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = scratch_dir("disk-round-trip");
        let original = PixelGrid::new(
            7,
            5,
            ChannelLayout::Rgb,
            (0..7 * 5 * 3).map(|i| (i * 11 % 256) as u8).collect(),
        );
        let source = dir.join("photo.png");
        save_png(&original, &source).unwrap();

        let mut session = Session::with_key(-99);
        session.load(&source).unwrap();
        let swapped = session.run(Action::Swap).unwrap();

        session.load(&swapped.output_path).unwrap();
        let restored = session.run(Action::Unswap).unwrap();

        assert_eq!(restored.output_path, dir.join("unswapped_image.png"));
        assert_eq!(load_image(&restored.output_path).unwrap(), original);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_run_creates_missing_output_directory() {
        let dir = scratch_dir("missing-dir");
        let source = dir.join("gone").join("input.png");

        let mut session = Session::new();
        session.load_decoded(&source, sample_image());
        let outcome = session.run(Action::Decrypt).unwrap();

        assert!(outcome.output_path.exists());
        assert_eq!(outcome.output_path, dir.join("gone").join("decrypted_image.png"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_preview_is_bounded() {
        let mut session = Session::new();
        let dir = scratch_dir("preview");
        session.load_decoded(
            dir.join("big.png"),
            PixelGrid::new(600, 150, ChannelLayout::Gray, vec![0u8; 600 * 150]),
        );

        let outcome = session.run(Action::Swap).unwrap();
        assert_eq!((outcome.preview.width, outcome.preview.height), (300, 75));
        assert_eq!((outcome.image.width, outcome.image.height), (600, 150));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let dir = scratch_dir("bad-load");
        let junk = dir.join("not-an-image.png");
        std::fs::write(&junk, b"definitely not a png").unwrap();

        let mut session = Session::new();
        session.load_decoded(dir.join("good.png"), sample_image());

        let err = session.load(&junk).unwrap_err();
        assert!(matches!(err, SessionError::Decode(_)));
        assert_eq!(session.image(), Some(&sample_image()));
        assert_eq!(session.source_path(), Some(dir.join("good.png").as_path()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
