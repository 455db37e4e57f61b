use std::ops::Deref;

use image::{ImageBuffer, Pixel};

use super::Raster;

impl<P, C> Raster for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    fn channels(&self) -> usize {
        P::CHANNEL_COUNT as usize
    }

    fn sample(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.get_pixel(x as u32, y as u32).channels()[channel]
    }
}
