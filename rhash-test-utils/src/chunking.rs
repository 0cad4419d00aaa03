//! Helpers for feeding data to a context in pieces

use rhash_core::{AlgorithmSet, Digest, HashContext, Result};

/// Split `data` at the given offsets; offsets past the end are clamped
pub fn split_at<'a>(data: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut points: Vec<usize> = cuts.iter().map(|cut| (*cut).min(data.len())).collect();
    points.sort_unstable();

    let mut pieces = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        pieces.push(&data[start..point]);
        start = point;
    }
    pieces.push(&data[start..]);
    pieces
}

/// Split `data` into chunks of `size` bytes (the last may be shorter)
pub fn fixed_chunks(data: &[u8], size: usize) -> Vec<&[u8]> {
    data.chunks(size.max(1)).collect()
}

/// Hash `pieces` as one stream
pub fn hash_chunks(algorithms: AlgorithmSet, pieces: &[&[u8]]) -> Result<Vec<Digest>> {
    let mut context = HashContext::new(algorithms)?;
    for piece in pieces {
        context.update(piece)?;
    }
    Ok(context.into_digests())
}

/// Hash `data` with a single update
pub fn hash_whole(algorithms: AlgorithmSet, data: &[u8]) -> Result<Vec<Digest>> {
    hash_chunks(algorithms, &[data])
}
