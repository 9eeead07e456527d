mod html_tests;
mod view_tests;

use crate::pipeline::{FilterKind, FilterOptions, FilteredLines};
use bytes::Bytes;

pub(super) fn filtered(kind: FilterKind, name: &str, text: &str, opts: FilterOptions) -> FilteredLines {
    let raw: Vec<Bytes> = text
        .split_inclusive('\n')
        .map(|l| Bytes::copy_from_slice(l.as_bytes()))
        .collect();
    kind.apply(name, raw.into_iter(), &opts)
}

pub(super) fn collect(chunks: impl Iterator<Item = Bytes>) -> String {
    let bytes: Vec<u8> = chunks.flat_map(|c| c.to_vec()).collect();
    String::from_utf8(bytes).expect("rendered output is utf-8")
}
