//! Property-style coverage for the copy loop: content preservation across
//! arbitrary text and buffer sizes, progress accounting, and the UTF-8
//! bridges.

use std::io;

use proptest::prelude::*;
use textfetch::{
    CopyOptions, FetchEvent, FreshBuffers, StrSource, TextFetcher, TextSource, Utf8Sink,
    Utf8Source,
};

/// Byte reader that hands out at most `chunk` bytes per call.
struct ChunkedReader {
    bytes: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl io::Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.chunk.min(buf.len()).min(self.bytes.len() - self.pos);
        buf[..count].copy_from_slice(&self.bytes[self.pos..self.pos + count]);
        self.pos += count;
        Ok(count)
    }
}

proptest! {
    #[test]
    fn copy_preserves_content(text in ".*", size in 1usize..64) {
        let mut fetcher = TextFetcher::with_buffer_size(size);
        let mut source = StrSource::new(&text);
        let mut collected = String::new();

        let total = fetcher
            .copy(
                Some(&mut source),
                Some(&mut collected),
                None,
                CopyOptions::default(),
            )
            .expect("copy succeeds");

        prop_assert_eq!(total, text.chars().count() as u64);
        prop_assert_eq!(collected, text);
    }

    #[test]
    fn fetch_equals_the_char_sequence(text in ".*") {
        let mut fetcher = TextFetcher::with_strategy(FreshBuffers::with_size(16));
        let mut source = StrSource::new(&text);

        let block = fetcher
            .fetch(Some(&mut source), None, false)
            .expect("fetch succeeds");

        prop_assert_eq!(block, text.chars().collect::<Vec<char>>());
    }

    #[test]
    fn progress_totals_never_decrease(text in ".*", size in 1usize..16) {
        let mut fetcher = TextFetcher::with_buffer_size(size);
        let mut source = StrSource::new(&text);
        let mut totals = Vec::new();
        let mut listener = |event: FetchEvent<'_>| {
            if let FetchEvent::Progress { fetched } = event {
                totals.push(fetched);
            }
        };

        fetcher
            .copy(Some(&mut source), None, Some(&mut listener), CopyOptions::default())
            .expect("copy succeeds");

        prop_assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(totals.last().copied(), Some(text.chars().count() as u64));
    }

    #[test]
    fn utf8_bridges_round_trip(text in ".*", chunk in 1usize..8, size in 1usize..16) {
        let reader = ChunkedReader {
            bytes: text.as_bytes().to_vec(),
            pos: 0,
            chunk,
        };
        let mut fetcher = TextFetcher::with_buffer_size(size);
        let mut source = Utf8Source::new(reader);
        let mut sink = Utf8Sink::new(Vec::new());

        fetcher
            .copy(
                Some(&mut source),
                Some(&mut sink),
                None,
                CopyOptions::default(),
            )
            .expect("copy succeeds");

        prop_assert_eq!(sink.into_inner(), text.into_bytes());
    }

    #[test]
    fn utf8_source_reads_any_granularity(text in ".*", chunk in 1usize..8) {
        let reader = ChunkedReader {
            bytes: text.as_bytes().to_vec(),
            pos: 0,
            chunk,
        };
        let mut source = Utf8Source::new(reader);
        let mut buf = ['\0'; 5];
        let mut collected = String::new();

        loop {
            let count = source.read(&mut buf).expect("read succeeds");
            if count == 0 {
                break;
            }
            collected.extend(&buf[..count]);
        }

        prop_assert_eq!(collected, text);
    }
}
