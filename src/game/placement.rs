//! Random grid-aligned placement

use rand::Rng;

use super::field::Field;
use super::position::Position;

/// Uniform value in `[min, max]`, floored to a multiple of `cell`.
///
/// With `min = 0` and `max = dimension - cell` the result always leaves room
/// for a whole cell inside the field.
pub fn random_grid_coordinate<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32, cell: i32) -> i32 {
    let value = if max > min { rng.gen_range(min..=max) } else { min };
    value.div_euclid(cell) * cell
}

/// A random cell anywhere on the field
pub fn random_position<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> Position {
    Position::new(random_column(field, rng), random_row(field, rng))
}

/// A random y for a whole row
pub fn random_row<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> i32 {
    random_grid_coordinate(rng, 0, field.max_y(), field.cell)
}

/// A random x for a whole column
pub fn random_column<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> i32 {
    random_grid_coordinate(rng, 0, field.max_x(), field.cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_coordinate_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..2_000 {
            let x = random_grid_coordinate(&mut rng, 0, 940, 20);
            assert!((0..=940).contains(&x));
            assert_eq!(x % 20, 0);
        }
    }

    #[test]
    fn test_position_inside_field() {
        let field = Field::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2_000 {
            let pos = random_position(&field, &mut rng);
            assert!(pos.x >= 0 && pos.x <= field.max_x());
            assert!(pos.y >= 0 && pos.y <= field.max_y());
            assert!(pos.is_aligned(field.cell));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_grid_coordinate(&mut rng, 40, 40, 20), 40);
        assert_eq!(random_grid_coordinate(&mut rng, 45, 45, 20), 40);
    }
}
