//! Latest classified frame per camera and the producer-side handoff.
//!
//! Frames are immutable snapshots. Ingestion threads post them through a
//! [`FrameSender`]; the fusion thread picks up the newest one in
//! [`ObservationBuffer::consume_update`]. The channel holds at most one
//! frame: when a producer outruns fusion the oldest pending frame is dropped,
//! so fusion always works on the most recent image and never on a buffer
//! that is being written.
//!
//! ```rust
//! use drishti::camera::{ClassifiedFrame, ImageSize, ObservationBuffer, PixelLabel};
//!
//! let mut buffer = ObservationBuffer::new(ImageSize::new(4, 4));
//! let sender = buffer.sender();
//!
//! sender.send(ClassifiedFrame::filled(4, 4, 255)).unwrap();
//! assert!(buffer.consume_update());
//! assert_eq!(buffer.label_at(1, 1), Some(PixelLabel::Occupied));
//! assert!(!buffer.consume_update());
//! ```

use std::mem;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, bounded};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::CellType;
use crate::error::FrameError;

use super::model::ImageSize;

/// Pending frames between producer and fusion. One: only the newest matters.
const FRAME_CHANNEL_CAPACITY: usize = 1;

/// A grey-level image where bright pixels mark obstacles.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedFrame {
    image: GrayImage,
}

impl ClassifiedFrame {
    /// Wrap a decoded grey image.
    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    /// Build a frame from row-major pixel values.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;
        let actual = pixels.len();
        GrayImage::from_raw(width, height, pixels)
            .filter(|_| actual == expected)
            .map(Self::new)
            .ok_or(FrameError::BufferLength { expected, actual })
    }

    /// Frame with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::new(GrayImage::from_pixel(width, height, Luma([value])))
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Grey value at a pixel, `None` outside the image.
    #[inline]
    pub fn value_at(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Underlying image
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    fn check_size(&self, expected: ImageSize) -> Result<(), FrameError> {
        if self.width() != expected.width || self.height() != expected.height {
            return Err(FrameError::DimensionMismatch {
                expected_width: expected.width,
                expected_height: expected.height,
                actual_width: self.width(),
                actual_height: self.height(),
            });
        }
        Ok(())
    }
}

/// Per-pixel classification of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLabel {
    /// Nothing above threshold in the lookup window
    Free,
    /// At least one pixel above threshold
    Occupied,
}

impl From<PixelLabel> for CellType {
    fn from(label: PixelLabel) -> Self {
        match label {
            PixelLabel::Free => CellType::Free,
            PixelLabel::Occupied => CellType::Occupied,
        }
    }
}

/// How grey values turn into labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Values strictly above this are obstacles.
    pub occupied_threshold: u8,
    /// Half-width of the square lookup window in pixels. 0 = single pixel.
    pub neighborhood_radius: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            occupied_threshold: 128,
            neighborhood_radius: 0,
        }
    }
}

/// Latest frame for one camera plus its "new data" flag.
#[derive(Debug)]
pub struct ObservationBuffer {
    image_size: ImageSize,
    classifier: ClassifierConfig,
    frame: Option<Arc<ClassifiedFrame>>,
    updated: bool,
    tx: Sender<Arc<ClassifiedFrame>>,
    rx: Receiver<Arc<ClassifiedFrame>>,
}

impl ObservationBuffer {
    /// Empty buffer for frames of the given size.
    pub fn new(image_size: ImageSize) -> Self {
        Self::with_classifier(image_size, ClassifierConfig::default())
    }

    /// Empty buffer with a custom classifier.
    pub fn with_classifier(image_size: ImageSize, classifier: ClassifierConfig) -> Self {
        let (tx, rx) = bounded(FRAME_CHANNEL_CAPACITY);
        Self {
            image_size,
            classifier,
            frame: None,
            updated: false,
            tx,
            rx,
        }
    }

    /// Handle for producer threads.
    pub fn sender(&self) -> FrameSender {
        FrameSender {
            image_size: self.image_size,
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }

    /// Expected frame size
    #[inline]
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    /// Classification parameters
    #[inline]
    pub fn classifier(&self) -> ClassifierConfig {
        self.classifier
    }

    /// Replace the classification parameters.
    pub fn set_classifier(&mut self, classifier: ClassifierConfig) {
        self.classifier = classifier;
    }

    /// Current frame, if any has arrived.
    pub fn frame(&self) -> Option<&ClassifiedFrame> {
        self.frame.as_deref()
    }

    /// Has a frame arrived that fusion has not consumed yet?
    ///
    /// Does not drain the channel; frames still in flight are not counted.
    #[inline]
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Store a frame directly, bypassing the channel.
    ///
    /// A wrong-sized frame is rejected and the buffer left as it was. Any
    /// frame still pending in the channel is older and gets discarded.
    pub fn set_from_classified_image(&mut self, frame: ClassifiedFrame) -> Result<(), FrameError> {
        frame.check_size(self.image_size)?;
        while self.rx.try_recv().is_ok() {}
        self.frame = Some(Arc::new(frame));
        self.updated = true;
        Ok(())
    }

    /// Pick up the newest posted frame, then report and clear the flag.
    pub fn consume_update(&mut self) -> bool {
        if let Some(frame) = self.rx.try_iter().last() {
            self.frame = Some(frame);
            self.updated = true;
        }
        mem::take(&mut self.updated)
    }

    /// Classify a pixel.
    ///
    /// Occupied if any pixel in the window around `(px, py)` is above the
    /// threshold. The window is clipped to the image. `None` when the pixel
    /// is outside the image or no frame has arrived yet.
    pub fn label_at(&self, px: u32, py: u32) -> Option<PixelLabel> {
        let frame = self.frame.as_deref()?;
        if px >= frame.width() || py >= frame.height() {
            return None;
        }

        let radius = self.classifier.neighborhood_radius;
        let threshold = self.classifier.occupied_threshold;
        let x_end = px.saturating_add(radius).min(frame.width() - 1);
        let y_end = py.saturating_add(radius).min(frame.height() - 1);

        for y in py.saturating_sub(radius)..=y_end {
            for x in px.saturating_sub(radius)..=x_end {
                if frame.image.get_pixel(x, y).0[0] > threshold {
                    return Some(PixelLabel::Occupied);
                }
            }
        }
        Some(PixelLabel::Free)
    }
}

/// Producer handle for one camera's frames.
///
/// Cheap to clone and `Send`. Sending never blocks: if fusion has not picked
/// up the previous frame yet, that frame is dropped in favour of the new one.
#[derive(Clone, Debug)]
pub struct FrameSender {
    image_size: ImageSize,
    tx: Sender<Arc<ClassifiedFrame>>,
    // Lets the producer evict a stale frame; also keeps the channel connected
    rx: Receiver<Arc<ClassifiedFrame>>,
}

impl FrameSender {
    /// Expected frame size
    #[inline]
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    /// Post a frame that already has the camera's dimensions.
    pub fn send(&self, frame: ClassifiedFrame) -> Result<(), FrameError> {
        frame.check_size(self.image_size)?;

        let mut frame = Arc::new(frame);
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    frame = err.into_inner();
                    if self.rx.try_recv().is_ok() {
                        trace!("Dropped stale frame in favour of a newer one");
                    }
                }
            }
        }
    }

    /// Resample any grey image to the camera's size, then post it.
    ///
    /// Nearest-neighbour keeps classification values intact.
    pub fn send_resized(&self, image: GrayImage) -> Result<(), FrameError> {
        let ImageSize { width, height } = self.image_size;
        let image = if image.width() == width && image.height() == height {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Nearest)
        };
        self.send(ClassifiedFrame::new(image))
    }
}
