use crate::cache::fingerprint::InputFingerprint;
use crate::foundation::core::Affine;
use crate::render::texture::Texture;

/// A rendered raster together with the transform that maps it back to unit-scale local space.
///
/// Immutable once built. Drawing a snapshot means applying [`Snapshot::transform`] and then
/// drawing [`Snapshot::texture`].
#[derive(Clone, Debug)]
pub struct Snapshot {
    texture: Texture,
    transform: Affine,
    scale_factor: f64,
    fingerprint: Option<InputFingerprint>,
}

impl Snapshot {
    /// Wrap `texture` rendered at `scale_factor`; the transform is the inverse scale.
    pub(crate) fn new(texture: Texture, scale_factor: f64) -> Self {
        Self {
            texture,
            transform: Affine::scale(scale_factor).inverse(),
            scale_factor,
            fingerprint: None,
        }
    }

    pub(crate) fn with_fingerprint(mut self, fingerprint: InputFingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Scale the texture was rendered at.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Digest of the inputs the texture was rendered from, when known.
    pub fn fingerprint(&self) -> Option<InputFingerprint> {
        self.fingerprint
    }

    /// Bytes held by the texture.
    pub fn memory_usage(&self) -> usize {
        self.texture.byte_len()
    }
}
