//! Scalar image bound to a pixel domain

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

use super::{Domain, Point, Weight};

/// A scalar image: one weight per pixel of a rectangular [`Domain`].
///
/// Values are stored flat in row-major order, so a pixel's position in the
/// backing slice is exactly its linear domain index. All tree algorithms
/// address pixels through those indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Weight> {
    domain: Domain,
    data: Vec<T>,
}

impl<T: Weight> Image<T> {
    /// Create a zero-filled image over `domain`
    pub fn new(domain: Domain) -> Result<Self> {
        Self::from_vec(vec![T::zero(); domain.point_count()], domain)
    }

    /// Create an image over `domain` filled with `value`
    pub fn filled(domain: Domain, value: T) -> Result<Self> {
        Self::from_vec(vec![value; domain.point_count()], domain)
    }

    /// Create an image from flat row-major data.
    ///
    /// Fails on an empty domain, on a pixel count past the `u32` index
    /// range, or when `data` does not match the domain size.
    pub fn from_vec(data: Vec<T>, domain: Domain) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if domain.point_count() >= u32::MAX as usize {
            return Err(Error::DomainTooLarge {
                points: domain.point_count(),
            });
        }
        if data.len() != domain.point_count() {
            return Err(Error::SizeMismatch {
                expected: domain.point_count(),
                actual: data.len(),
            });
        }
        Ok(Self { domain, data })
    }

    /// Create an image from an ndarray, anchored at the origin
    pub fn from_array(data: Array2<T>) -> Result<Self> {
        let (rows, cols) = data.dim();
        let domain = Domain::from_size(cols as u32, rows as u32);
        Self::from_vec(data.into_iter().collect(), domain)
    }

    /// View the image as a (rows, cols) ndarray
    pub fn view(&self) -> Result<ArrayView2<'_, T>> {
        let shape = (self.domain.height() as usize, self.domain.width() as usize);
        ArrayView2::from_shape(shape, &self.data).map_err(|e| Error::Other(e.to_string()))
    }

    /// Copy the image into a fresh (rows, cols) ndarray
    pub fn to_array(&self) -> Result<Array2<T>> {
        Ok(self.view()?.to_owned())
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major pixel weights
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the image and return the flat pixel weights
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Weight at linear index `idx`
    pub fn value(&self, idx: u32) -> Result<T> {
        self.data
            .get(idx as usize)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            })
    }

    /// Weight at coordinate `p`
    pub fn get(&self, p: Point) -> Result<T> {
        let idx = self
            .domain
            .index_of(p)
            .ok_or(Error::PointOutOfDomain { x: p.x, y: p.y })?;
        self.value(idx)
    }

    /// Set the weight at coordinate `p`
    pub fn set(&mut self, p: Point, value: T) -> Result<()> {
        let idx = self
            .domain
            .index_of(p)
            .ok_or(Error::PointOutOfDomain { x: p.x, y: p.y })?;
        self.data[idx as usize] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let image: Image<u8> = Image::new(Domain::from_size(4, 3)).unwrap();
        assert_eq!(image.len(), 12);
        assert_eq!(image.value(0).unwrap(), 0);
    }

    #[test]
    fn test_image_access() {
        let mut image: Image<u8> = Image::new(Domain::from_size(4, 3)).unwrap();
        image.set(Point::new(2, 1), 42).unwrap();
        assert_eq!(image.get(Point::new(2, 1)).unwrap(), 42);
        // row-major: index = y * width + x
        assert_eq!(image.value(6).unwrap(), 42);
    }

    #[test]
    fn test_empty_domain_rejected() {
        let result: Result<Image<u8>> = Image::from_vec(vec![], Domain::from_size(0, 5));
        assert!(matches!(result, Err(Error::EmptyDomain)));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let result: Result<Image<u8>> = Image::from_vec(vec![0; 10], Domain::from_size(4, 3));
        assert!(matches!(
            result,
            Err(Error::SizeMismatch {
                expected: 12,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_ndarray_interop() {
        let array = Array2::from_shape_vec((2, 3), vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let image = Image::from_array(array.clone()).unwrap();
        assert_eq!(image.domain().width(), 3);
        assert_eq!(image.domain().height(), 2);
        assert_eq!(image.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(image.to_array().unwrap(), array);
        assert_eq!(image.view().unwrap()[(1, 0)], 4);
    }

    #[test]
    fn test_out_of_bounds() {
        let image: Image<u8> = Image::new(Domain::from_size(2, 2)).unwrap();
        assert!(image.value(4).is_err());
        assert!(image.get(Point::new(2, 0)).is_err());
    }
}
