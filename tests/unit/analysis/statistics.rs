//! Tests for example image labelling and adjacency counting

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use image::{Rgba, RgbaImage};
    use tilecollapse::AlgorithmError;
    use tilecollapse::analysis::statistics::AdjacencyStatistics;
    use tilecollapse::spatial::direction::Direction;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn color_index() -> HashMap<[u8; 3], usize> {
        HashMap::from([(RED, 0), (GREEN, 1), (BLUE, 2)])
    }

    fn paint(rows: &[&[[u8; 3]]]) -> RgbaImage {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        RgbaImage::from_fn(width, height, |x, y| {
            let [r, g, b] = rows[y as usize][x as usize];
            Rgba([r, g, b, 255])
        })
    }

    fn observed(stats: &AdjacencyStatistics, label: usize, direction: Direction) -> Vec<usize> {
        stats
            .observed_neighbors(label, direction)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    // Pixel counts become weights, unused entries count zero
    #[test]
    fn test_counts() {
        let example = paint(&[&[RED, GREEN, RED], &[RED, RED, GREEN]]);
        let stats = AdjacencyStatistics::from_example(&example, &color_index(), 3)
            .expect("all colors known");

        assert_eq!(stats.count(0), 4);
        assert_eq!(stats.count(1), 2);
        assert_eq!(stats.count(2), 0);
        assert_eq!(stats.count(9), 0);
        assert_eq!(stats.labels().dim(), (2, 3));
        assert_eq!(stats.labels()[(1, 2)], 1);
    }

    // Adjacency is recorded per direction, in both directions of each pair
    #[test]
    fn test_observed_neighbors() {
        let example = paint(&[&[RED, GREEN], &[BLUE, BLUE]]);
        let stats = AdjacencyStatistics::from_example(&example, &color_index(), 3)
            .expect("all colors known");

        assert_eq!(observed(&stats, 0, Direction::East), vec![1]);
        assert_eq!(observed(&stats, 0, Direction::South), vec![2]);
        assert!(observed(&stats, 0, Direction::North).is_empty());
        assert!(observed(&stats, 0, Direction::West).is_empty());

        assert_eq!(observed(&stats, 1, Direction::West), vec![0]);
        assert_eq!(observed(&stats, 2, Direction::North), vec![0, 1]);
        assert_eq!(observed(&stats, 2, Direction::East), vec![2]);
        assert_eq!(observed(&stats, 2, Direction::West), vec![2]);
        assert_eq!(
            stats.observed_neighbors(5, Direction::North),
            None::<&BTreeSet<usize>>
        );
    }

    // Alpha plays no part in matching
    #[test]
    fn test_alpha_ignored() {
        let mut example = paint(&[&[RED, GREEN]]);
        example.put_pixel(1, 0, Rgba([0, 255, 0, 7]));
        let stats = AdjacencyStatistics::from_example(&example, &color_index(), 3)
            .expect("alpha ignored");
        assert_eq!(stats.count(1), 1);
    }

    // The first unknown pixel in row-major order is reported
    #[test]
    fn test_unknown_color() {
        let example = paint(&[&[RED, RED], &[[1, 2, 3], [4, 5, 6]]]);
        let result = AdjacencyStatistics::from_example(&example, &color_index(), 3);
        assert!(matches!(
            result,
            Err(AlgorithmError::UnknownPixelColor {
                color: [1, 2, 3],
                position: [0, 1]
            })
        ));
    }
}
