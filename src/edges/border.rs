use crate::image::ImageViewMut;

/// Zero the one-pixel frame (first/last row, first/last column) in place.
///
/// Images narrower or shorter than 2 pixels are only partially defined;
/// callers validate dimensions before padding.
pub fn pad<I>(image: &mut I)
where
    I: ImageViewMut,
    I::Pixel: Default,
{
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return;
    }
    image.row_mut(0).fill(I::Pixel::default());
    image.row_mut(h - 1).fill(I::Pixel::default());
    for y in 1..h - 1 {
        let row = image.row_mut(y);
        row[0] = I::Pixel::default();
        row[w - 1] = I::Pixel::default();
    }
}
