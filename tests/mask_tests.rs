#![allow(missing_docs)]

use flappy_evo::simulation::mask::Mask;

fn single_pixel(width: usize, height: usize, x: usize, y: usize) -> Mask {
    let mut mask = Mask::empty(width, height);
    mask.set(x, y, true);
    mask
}

#[test]
fn test_overlap_reports_shared_pixel() {
    let a = single_pixel(4, 4, 3, 2);
    let b = single_pixel(4, 4, 1, 0);

    // b's pixel lands on (1 + 2, 0 + 2) = (3, 2)
    assert_eq!(a.overlap(&b, (2, 2)), Some((3, 2)));
    assert_eq!(a.overlap(&b, (2, 1)), None);
    assert_eq!(a.overlap(&b, (1, 2)), None);
}

#[test]
fn test_overlap_negative_offset() {
    let a = single_pixel(4, 4, 0, 0);
    let b = single_pixel(4, 4, 3, 3);

    assert_eq!(a.overlap(&b, (-3, -3)), Some((0, 0)));
    assert!(b.overlaps(&a, (3, 3)));
}

#[test]
fn test_no_overlap_outside_bounds() {
    let a = Mask::filled(4, 4);
    let b = Mask::filled(4, 4);

    assert!(a.overlaps(&b, (3, 3)));
    assert!(!a.overlaps(&b, (4, 0)));
    assert!(!a.overlaps(&b, (0, -4)));
    assert!(!a.overlaps(&b, (-100, 100)));
}

#[test]
fn test_overlap_is_pixel_exact_not_bounding_box() {
    // two diagonals whose boxes coincide but whose pixels interleave
    let a = Mask::from_fn(8, 8, |x, y| x == y);
    let b = Mask::from_fn(8, 8, |x, y| x == y + 1);

    assert!(!a.overlaps(&b, (0, 0)));
    assert!(a.overlaps(&b, (-1, 0)));

    let transparent = Mask::empty(8, 8);
    assert!(!a.overlaps(&transparent, (0, 0)));
}

#[test]
fn test_from_rgba_alpha_threshold() {
    let mut rgba = vec![255u8; 2 * 2 * 4];
    rgba[3] = 127;
    rgba[7] = 128;
    rgba[11] = 0;

    let mask = Mask::from_rgba(2, 2, &rgba);

    assert!(!mask.get(0, 0));
    assert!(mask.get(1, 0));
    assert!(!mask.get(0, 1));
    assert!(mask.get(1, 1));
    assert_eq!(mask.count(), 2);
}

#[test]
fn test_from_rgba_short_buffer_is_transparent() {
    let mask = Mask::from_rgba(2, 2, &[0, 0, 0, 255]);

    assert!(mask.get(0, 0));
    assert_eq!(mask.count(), 1);
}

#[test]
fn test_flip_and_scale() {
    let mask = single_pixel(3, 2, 2, 0);

    let flipped = mask.flipped_vertically();
    assert!(flipped.get(2, 1));
    assert!(!flipped.get(2, 0));

    let scaled = mask.scaled2x();
    assert_eq!((scaled.width(), scaled.height()), (6, 4));
    assert_eq!(scaled.count(), 4);
    for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
        assert!(scaled.get(x, y));
    }
}

#[test]
fn test_out_of_range_access() {
    let mut mask = Mask::filled(2, 2);
    mask.set(5, 5, false);

    assert_eq!(mask.count(), 4);
    assert!(!mask.get(2, 0));
}
