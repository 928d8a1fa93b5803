use rand::Rng;

/// Priority score used to order unresolved cells
///
/// For `N` weights summing to `W` the score is `N + sum(p * log2(p))` with
/// `p = w / W`. This is not Shannon entropy: it shrinks as the set narrows and
/// as weight mass concentrates on fewer tiles, so lower means more certain.
/// An empty set scores exactly 0, zero weights contribute nothing, and a set
/// whose weights sum to zero scores `N`.
pub fn entropy_score<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    if weights.is_empty() {
        return 0.0;
    }

    let count = weights.len() as f64;
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return count;
    }

    let information: f64 = weights
        .iter()
        .filter(|&&weight| weight > 0.0)
        .map(|&weight| {
            let p = weight / total;
            p * p.log2()
        })
        .sum();

    count + information
}

/// Weighted random selection
///
/// Returns an index into `weights` drawn with probability proportional to its
/// weight. Entries with a non-positive weight are never returned; `None` means
/// nothing was selectable.
pub fn weighted_choice<R>(weights: &[f64], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let total: f64 = weights.iter().filter(|&&weight| weight > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut remaining = rng.random::<f64>() * total;
    let mut last_selectable = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_selectable = Some(index);
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    // Rounding can leave a sliver of mass past the final bucket
    last_selectable
}
