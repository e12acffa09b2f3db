/// Concatenate byte slices into a single buffer allocated once at the exact total size.
#[inline]
pub fn concat_pre_allocated(parts: &[&[u8]]) -> Vec<u8> {
    let total: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}
