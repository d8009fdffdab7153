// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::errors::Error;

/// Big-endian encoding of `value` on exactly `len` bytes (RFC 8017 I2OSP).
pub fn i2osp(value: usize, len: usize) -> Vec<u8> {
    let be = (value as u64).to_be_bytes();
    if len >= be.len() {
        let mut out = vec![0u8; len - be.len()];
        out.extend_from_slice(&be);
        out
    } else {
        be[be.len() - len..].to_vec()
    }
}

pub fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    (0..length).filter(|i| !indexes.contains(i)).collect()
}

/// Sorts the disclosed indexes, rejecting duplicates and anything outside `[0, total)`.
pub fn check_disclosed_indexes(total: usize, indexes: &[usize]) -> Result<Vec<usize>, Error> {
    let mut sorted = indexes.to_vec();
    sorted.sort_unstable();

    if let Some(&invalid) = sorted.iter().find(|&&i| i >= total) {
        return Err(Error::InvalidArgument(format!(
            "disclosed index {} out of range [0, {})",
            invalid, total
        )));
    }
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(Error::InvalidArgument(format!("duplicate disclosed index {}", w[0])));
    }

    Ok(sorted)
}

/// Sequential reader over a canonical encoding.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                Error::DeserializationError(format!(
                    "need {} bytes at offset {}, only {} left",
                    len,
                    self.pos,
                    self.bytes.len() - self.pos
                ))
            })?;
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    pub(crate) fn read_u64(&mut self) -> Result<usize, Error> {
        let raw = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(raw);
        usize::try_from(u64::from_be_bytes(buf))
            .map_err(|_| Error::DeserializationError("length does not fit in usize".to_owned()))
    }

    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.pos != self.bytes.len() {
            return Err(Error::DeserializationError(format!(
                "{} trailing bytes",
                self.bytes.len() - self.pos
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2osp_pads_and_truncates() {
        assert_eq!(i2osp(1, 2), vec![0, 1]);
        assert_eq!(i2osp(258, 8), vec![0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(i2osp(7, 10), vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn disclosed_indexes_are_validated() {
        assert_eq!(check_disclosed_indexes(5, &[3, 1]).unwrap(), vec![1, 3]);
        assert!(check_disclosed_indexes(0, &[]).unwrap().is_empty());
        assert!(matches!(check_disclosed_indexes(3, &[3]), Err(Error::InvalidArgument(_))));
        assert!(matches!(check_disclosed_indexes(3, &[1, 1]), Err(Error::InvalidArgument(_))));
        assert_eq!(get_remaining_indexes(5, &[1, 3]), vec![0, 2, 4]);
    }

    #[test]
    fn reader_reports_short_input() {
        let mut reader = ByteReader::new(&[0, 0, 0, 0, 0, 0, 0, 9, 1]);
        assert_eq!(reader.read_u64().unwrap(), 9);
        assert!(reader.take(2).is_err());
        assert_eq!(reader.take(1).unwrap(), &[1]);
        assert!(reader.finish().is_ok());
    }
}
