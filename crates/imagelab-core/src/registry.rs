//! The method catalog.
//!
//! The sixteen methods form a closed [`Method`] enum. [`CATALOG`] is a
//! compile-time table mapping each variant to its descriptor (id, name,
//! description, parameter schema) and transform function. Catalog order is
//! the order a UI presents, numbered from 1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::TransformError;
use crate::ops::{
    self, BilateralParams, BlurKernel, BrightnessContrast, CannyThresholds, MorphOp, SharpenParams,
    StructuringElement,
};
use crate::params::{ParameterSet, ParameterSpec};

/// Signature shared by every registered transform.
///
/// The function normalizes `params` itself, so callers can pass a partial or
/// out-of-range set.
pub type TransformFn = fn(&PixelBuffer, &ParameterSet) -> PixelBuffer;

/// Identifier of a transformation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    ImageNegative,
    Grayscale,
    HistogramEqualization,
    Threshold,
    GaussianBlur,
    MedianBlur,
    BilateralFilter,
    CannyEdges,
    SobelEdges,
    LaplacianEdges,
    MorphOpen,
    MorphClose,
    Dilation,
    Erosion,
    BrightnessContrast,
    Sharpen,
}

impl Method {
    /// All methods in catalog order.
    pub const ALL: [Method; 16] = [
        Method::ImageNegative,
        Method::Grayscale,
        Method::HistogramEqualization,
        Method::Threshold,
        Method::GaussianBlur,
        Method::MedianBlur,
        Method::BilateralFilter,
        Method::CannyEdges,
        Method::SobelEdges,
        Method::LaplacianEdges,
        Method::MorphOpen,
        Method::MorphClose,
        Method::Dilation,
        Method::Erosion,
        Method::BrightnessContrast,
        Method::Sharpen,
    ];

    /// Stable kebab-case identifier.
    pub fn id(self) -> &'static str {
        describe(self).id
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        describe(self).name
    }

    /// 1-based catalog number.
    pub fn position(self) -> usize {
        self as usize + 1
    }

    /// Look up a method by id or display name (names match case-insensitively).
    pub fn from_id(value: &str) -> Result<Method, TransformError> {
        CATALOG
            .iter()
            .find(|d| d.id == value || d.name.eq_ignore_ascii_case(value))
            .map(|d| d.method)
            .ok_or_else(|| TransformError::UnknownMethod(value.to_string()))
    }

    /// Whether the method always produces a 1-channel image.
    pub fn produces_grayscale(self) -> bool {
        !matches!(
            self,
            Method::ImageNegative
                | Method::GaussianBlur
                | Method::MedianBlur
                | Method::BilateralFilter
                | Method::BrightnessContrast
                | Method::Sharpen
        )
    }
}

impl FromStr for Method {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::from_id(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalog entry for one method.
#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    #[serde(skip)]
    pub method: Method,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Parameters the method reads, in display order.
    pub params: &'static [ParameterSpec],
    /// `None` marks a catalog entry without an implementation; the engine
    /// returns its input unchanged for such entries.
    #[serde(skip)]
    pub transform: Option<TransformFn>,
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("params", &self.params)
            .field("implemented", &self.transform.is_some())
            .finish()
    }
}

impl MethodDescriptor {
    /// Parameter set holding this method's defaults.
    pub fn default_params(&self) -> ParameterSet {
        ParameterSet::from_specs(self.params)
    }

    /// Find a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }
}

// ============================================================================
// Parameter schema
// ============================================================================

pub const THRESHOLD: ParameterSpec =
    ParameterSpec::integer("threshold", "Threshold", 0.0, 255.0, 127.0);
pub const KERNEL_SIZE: ParameterSpec =
    ParameterSpec::integer("kernel_size", "Kernel Size", 1.0, 31.0, 3.0);
pub const ELEMENT_SIZE: ParameterSpec = KERNEL_SIZE.open_ended();
pub const DIAMETER: ParameterSpec = ParameterSpec::integer("diameter", "Diameter", 5.0, 50.0, 9.0);
pub const CANNY_THRESHOLD: ParameterSpec =
    ParameterSpec::integer("threshold", "Canny Threshold", 10.0, 300.0, 100.0);
pub const BRIGHTNESS: ParameterSpec =
    ParameterSpec::real("brightness", "Brightness", -100.0, 100.0, 0.0, 5.0);
pub const CONTRAST: ParameterSpec =
    ParameterSpec::real("contrast", "Contrast", 0.5, 3.0, 1.0, 0.1);
pub const SHARPNESS: ParameterSpec =
    ParameterSpec::integer("factor", "Sharpness Factor", 50.0, 300.0, 100.0);

const NO_PARAMS: &[ParameterSpec] = &[];
const THRESHOLD_PARAMS: &[ParameterSpec] = &[THRESHOLD];
const KERNEL_PARAMS: &[ParameterSpec] = &[KERNEL_SIZE];
const ELEMENT_PARAMS: &[ParameterSpec] = &[ELEMENT_SIZE];
const DIAMETER_PARAMS: &[ParameterSpec] = &[DIAMETER];
const CANNY_PARAMS: &[ParameterSpec] = &[CANNY_THRESHOLD];
const BRIGHTNESS_CONTRAST_PARAMS: &[ParameterSpec] = &[BRIGHTNESS, CONTRAST];
const SHARPEN_PARAMS: &[ParameterSpec] = &[SHARPNESS];

// ============================================================================
// Catalog
// ============================================================================

const fn entry(
    method: Method,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    params: &'static [ParameterSpec],
    transform: TransformFn,
) -> MethodDescriptor {
    MethodDescriptor {
        method,
        id,
        name,
        description,
        params,
        transform: Some(transform),
    }
}

/// Every method, indexed by `Method as usize`.
pub static CATALOG: [MethodDescriptor; 16] = [
    entry(
        Method::ImageNegative,
        "image-negative",
        "Image Negative",
        "Invert pixel values",
        NO_PARAMS,
        run_negative,
    ),
    entry(
        Method::Grayscale,
        "grayscale",
        "Grayscale",
        "Convert the image to grayscale",
        NO_PARAMS,
        run_grayscale,
    ),
    entry(
        Method::HistogramEqualization,
        "histogram-equalization",
        "Histogram Equalization",
        "Standard histogram equalization",
        NO_PARAMS,
        run_equalize,
    ),
    entry(
        Method::Threshold,
        "threshold",
        "Threshold (Binary)",
        "Convert to a black-and-white binary image",
        THRESHOLD_PARAMS,
        run_threshold,
    ),
    entry(
        Method::GaussianBlur,
        "gaussian-blur",
        "Gaussian Blur",
        "Blur with a Gaussian kernel",
        KERNEL_PARAMS,
        run_gaussian,
    ),
    entry(
        Method::MedianBlur,
        "median-blur",
        "Median Blur",
        "Median blur for noise reduction",
        KERNEL_PARAMS,
        run_median,
    ),
    entry(
        Method::BilateralFilter,
        "bilateral-filter",
        "Bilateral Filter",
        "Blur while preserving edges",
        DIAMETER_PARAMS,
        run_bilateral,
    ),
    entry(
        Method::CannyEdges,
        "canny-edges",
        "Canny Edge Detection",
        "Canny edge detection",
        CANNY_PARAMS,
        run_canny,
    ),
    entry(
        Method::SobelEdges,
        "sobel-edges",
        "Sobel Edge Detection",
        "Sobel edge detection",
        NO_PARAMS,
        run_sobel,
    ),
    entry(
        Method::LaplacianEdges,
        "laplacian-edges",
        "Laplacian Edge Detection",
        "Laplacian edge detection",
        NO_PARAMS,
        run_laplacian,
    ),
    entry(
        Method::MorphOpen,
        "morph-open",
        "Morphology (Open)",
        "Morphological opening",
        ELEMENT_PARAMS,
        run_open,
    ),
    entry(
        Method::MorphClose,
        "morph-close",
        "Morphology (Close)",
        "Morphological closing",
        ELEMENT_PARAMS,
        run_close,
    ),
    entry(
        Method::Dilation,
        "dilation",
        "Dilation",
        "Dilation (grows objects)",
        ELEMENT_PARAMS,
        run_dilate,
    ),
    entry(
        Method::Erosion,
        "erosion",
        "Erosion",
        "Erosion (shrinks objects)",
        ELEMENT_PARAMS,
        run_erode,
    ),
    entry(
        Method::BrightnessContrast,
        "brightness-contrast",
        "Brightness/Contrast Adjustment",
        "Adjust brightness and contrast",
        BRIGHTNESS_CONTRAST_PARAMS,
        run_brightness_contrast,
    ),
    entry(
        Method::Sharpen,
        "sharpen",
        "Sharpen / Contrast",
        "Sharpen and boost contrast",
        SHARPEN_PARAMS,
        run_sharpen,
    ),
];

/// All descriptors in catalog order.
pub fn list() -> &'static [MethodDescriptor] {
    &CATALOG
}

/// Descriptor for `method`.
pub fn describe(method: Method) -> &'static MethodDescriptor {
    &CATALOG[method as usize]
}

/// Transform function for `method`; entries without one resolve to identity.
pub fn resolve(method: Method) -> TransformFn {
    describe(method).transform.unwrap_or(identity)
}

/// Transform function for a string id or display name.
pub fn resolve_id(id: &str) -> Result<TransformFn, TransformError> {
    Method::from_id(id).map(resolve)
}

// ============================================================================
// Adapters: ParameterSet -> typed parameters -> ops
// ============================================================================

pub(crate) fn identity(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    buffer.clone()
}

fn run_negative(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    ops::negative(buffer)
}

fn run_grayscale(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    ops::grayscale(buffer)
}

fn run_equalize(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    ops::equalize_histogram(buffer)
}

fn run_threshold(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    ops::threshold(buffer, params.resolve(&THRESHOLD) as u8)
}

fn blur_kernel(params: &ParameterSet) -> BlurKernel {
    BlurKernel::new(params.resolve(&KERNEL_SIZE) as i64)
}

fn run_gaussian(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    ops::gaussian_blur(buffer, blur_kernel(params))
}

fn run_median(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    ops::median_blur(buffer, blur_kernel(params))
}

fn run_bilateral(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    let diameter = params.resolve(&DIAMETER) as usize;
    ops::bilateral_filter(buffer, BilateralParams::with_diameter(diameter))
}

fn run_canny(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    let upper = params.resolve(&CANNY_THRESHOLD) as u32;
    ops::canny(buffer, CannyThresholds::from_upper(upper))
}

fn run_sobel(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    ops::sobel(buffer)
}

fn run_laplacian(buffer: &PixelBuffer, _params: &ParameterSet) -> PixelBuffer {
    ops::laplacian(buffer)
}

fn run_morphology(buffer: &PixelBuffer, params: &ParameterSet, op: MorphOp) -> PixelBuffer {
    let element = StructuringElement::new(params.resolve(&ELEMENT_SIZE) as i64);
    ops::morphology(buffer, op, element)
}

fn run_open(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    run_morphology(buffer, params, MorphOp::Open)
}

fn run_close(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    run_morphology(buffer, params, MorphOp::Close)
}

fn run_dilate(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    run_morphology(buffer, params, MorphOp::Dilate)
}

fn run_erode(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    run_morphology(buffer, params, MorphOp::Erode)
}

fn run_brightness_contrast(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    let adjustment = BrightnessContrast {
        brightness: params.resolve(&BRIGHTNESS),
        contrast: params.resolve(&CONTRAST),
    };
    ops::brightness_contrast(buffer, adjustment)
}

fn run_sharpen(buffer: &PixelBuffer, params: &ParameterSet) -> PixelBuffer {
    ops::sharpen(buffer, SharpenParams::from_factor(params.resolve(&SHARPNESS)))
}
