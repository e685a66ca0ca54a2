//! Seeded randomized checks of mosaic invariants against a naive average.

use mosaic_canvas_core::PixelBuffer;
use mosaic_canvas_mosaic::{BlockSize, block_extent, block_grid, mosaic};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_buffer(rng: &mut StdRng) -> PixelBuffer {
    let width = rng.random_range(1..=40_u32);
    let height = rng.random_range(1..=40_u32);
    let rgba = (0..width * height * 4).map(|_| rng.random()).collect();
    PixelBuffer::new(width, height, rgba).expect("random buffer should be valid")
}

#[test]
fn mosaic_property_tests_blocks_match_naive_truncated_average() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..64 {
        let source = random_buffer(&mut rng);
        let side = rng.random_range(1..=16_u32);
        let block_size = BlockSize::new(side).unwrap();
        let output = mosaic(&source, Some(side)).expect("mosaic should succeed");
        assert_eq!(output.as_rgba().len(), source.as_rgba().len());

        let (columns, rows) = block_grid(source.width(), source.height(), block_size);
        for block_y in 0..rows {
            for block_x in 0..columns {
                let extent =
                    block_extent(source.width(), source.height(), block_size, block_x, block_y)
                        .expect("block is inside grid");

                let mut sums = [0_u64; 4];
                for y in extent.y.clone() {
                    for x in extent.x.clone() {
                        let pixel = source.pixel(x, y).unwrap();
                        for channel in 0..4 {
                            sums[channel] += u64::from(pixel[channel]);
                        }
                    }
                }
                let expected = sums.map(|sum| (sum / extent.pixel_count()) as u8);

                for y in extent.y.clone() {
                    for x in extent.x.clone() {
                        assert_eq!(output.pixel(x, y), Some(expected));
                    }
                }
            }
        }
    }
}

#[test]
fn mosaic_property_tests_block_extents_partition_the_image() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..32 {
        let width = rng.random_range(1..=50_u32);
        let height = rng.random_range(1..=50_u32);
        let block_size = BlockSize::new(rng.random_range(1..=20)).unwrap();
        let mut hits = vec![0_u8; (width * height) as usize];

        let (columns, rows) = block_grid(width, height, block_size);
        for block_y in 0..rows {
            for block_x in 0..columns {
                let extent = block_extent(width, height, block_size, block_x, block_y).unwrap();
                for y in extent.y.clone() {
                    for x in extent.x.clone() {
                        hits[(y * width + x) as usize] += 1;
                    }
                }
            }
        }

        assert!(hits.iter().all(|&count| count == 1));
    }
}

#[test]
fn mosaic_property_tests_alpha_edits_only_move_alpha() {
    let mut rng = StdRng::seed_from_u64(23);
    let source = random_buffer(&mut rng);
    let mut edited = source.clone();
    for pixel in edited.as_rgba_mut().chunks_exact_mut(4) {
        pixel[3] = rng.random();
    }

    let before = mosaic(&source, Some(5)).unwrap();
    let after = mosaic(&edited, Some(5)).unwrap();
    for (left, right) in before.as_rgba().chunks_exact(4).zip(after.as_rgba().chunks_exact(4)) {
        assert_eq!(left[..3], right[..3]);
    }
}

#[test]
fn mosaic_property_tests_oversized_block_gives_global_mean() {
    let mut rng = StdRng::seed_from_u64(97);
    let source = random_buffer(&mut rng);
    let side = source.width().max(source.height());
    let output = mosaic(&source, Some(side)).unwrap();

    let count = source.pixel_count() as u64;
    let mut sums = [0_u64; 4];
    for pixel in source.as_rgba().chunks_exact(4) {
        for channel in 0..4 {
            sums[channel] += u64::from(pixel[channel]);
        }
    }
    let mean = sums.map(|sum| (sum / count) as u8);
    assert!(output.as_rgba().chunks_exact(4).all(|pixel| pixel == mean));
}
