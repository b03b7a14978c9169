//! Zero Run-Length Transform (RLT): the second stage of the block codec.
//!
//! VSRC output is dominated by zero ranks (a byte's rank is zero whenever
//! it repeats whatever symbol was most recently seen), so RLT packs runs of
//! zero bytes into a short run of literal bits instead of writing them out
//! one byte at a time. Non-zero bytes pass through with a `+1` bias so that
//! `0x00`/`0x01` stay reserved for the run-length bit stream, and the two
//! byte values that would otherwise collide with that bias (`0xfe`,
//! `0xff`) are escaped instead.
//!
//! # Credit
//!
//! A clean-room implementation: the reference C sources this crate was
//! otherwise ported from have no zero-run-length transform of their own
//! (their only secondary transform is an unrelated frequency-bucket
//! permutation with a sentinel byte), so the bit-packing rules here follow
//! this crate's own bytewise bit-twiddling style rather than any ported
//! routine.

use crate::error::{BrcError, Result};

/// Marker byte value meaning "the body is a verbatim copy of the input".
const MARKER_VERBATIM: u8 = 0;
/// Marker byte value meaning "the body is the packed RLT form".
const MARKER_PACKED: u8 = 1;

/// Forward RLT transform. Encodes `src` (`L` bytes) into `dst`, writing at
/// most `L + 1` bytes: a packed or verbatim body followed by a one-byte
/// marker. Returns the number of bytes written.
///
/// `dst` must have room for `src.len() + 1` bytes; this is always
/// sufficient regardless of which branch is taken.
pub fn forward(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let l = src.len();
    let needed = l + 1;
    if dst.len() < needed {
        return Err(BrcError::BufferTooSmall {
            needed,
            got: dst.len(),
        });
    }

    match try_pack(src, &mut dst[..l]) {
        Some(packed_len) => {
            dst[packed_len] = MARKER_PACKED;
            log::trace!("rlt::forward: {} -> {} bytes (packed)", l, packed_len + 1);
            Ok(packed_len + 1)
        }
        None => {
            dst[..l].copy_from_slice(src);
            dst[l] = MARKER_VERBATIM;
            log::trace!("rlt::forward: {} -> {} bytes (pass-through)", l, l + 1);
            Ok(l + 1)
        }
    }
}

/// Attempt the packed encoding of `src` into `dst` (which has exactly
/// `src.len()` bytes of room). Returns the packed length on success, or
/// `None` the instant the write pointer would exceed `dst.len()`.
fn try_pack(src: &[u8], dst: &mut [u8]) -> Option<usize> {
    let cap = dst.len();
    let mut i = 0usize;
    let mut pos = 0usize;

    while i < src.len() {
        let b = src[i];
        if b == 0 {
            let mut k = 1usize;
            while i + k < src.len() && src[i + k] == 0 {
                k += 1;
            }
            let l_prime = (k + 1) as u32;
            let nbits = 31 - l_prime.leading_zeros();
            for bit_pos in (0..nbits).rev() {
                if pos >= cap {
                    return None;
                }
                dst[pos] = ((l_prime >> bit_pos) & 1) as u8;
                pos += 1;
            }
            i += k;
        } else if b == 0xfe || b == 0xff {
            if pos + 2 > cap {
                return None;
            }
            dst[pos] = 0xff;
            dst[pos + 1] = (b == 0xff) as u8;
            pos += 2;
            i += 1;
        } else {
            if pos >= cap {
                return None;
            }
            dst[pos] = b + 1;
            pos += 1;
            i += 1;
        }
    }
    Some(pos)
}

/// Inverse RLT transform. Decodes `src` (a packed-or-verbatim body plus its
/// trailing marker byte) into `dst`. Returns the number of bytes written.
///
/// Fails with [`BrcError::BufferTooSmall`] if `src` is empty (no marker to
/// read) or if the decoded output does not fit in `dst`.
pub fn inverse(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let m = src.len();
    if m == 0 {
        return Err(BrcError::BufferTooSmall { needed: 1, got: 0 });
    }
    let marker = src[m - 1];
    let body = &src[..m - 1];

    if marker == MARKER_VERBATIM {
        if dst.len() < body.len() {
            return Err(BrcError::BufferTooSmall {
                needed: body.len(),
                got: dst.len(),
            });
        }
        dst[..body.len()].copy_from_slice(body);
        log::trace!("rlt::inverse: {} -> {} bytes (pass-through)", m, body.len());
        return Ok(body.len());
    }

    let mut i = 0usize;
    let mut pos = 0usize;
    let cap = dst.len();
    while i < body.len() {
        let b = body[i];
        if b == 0xff {
            if i + 1 >= body.len() {
                // Truncated escape pair; nothing more to decode.
                break;
            }
            let bit = body[i + 1];
            if pos >= cap {
                return Err(BrcError::BufferTooSmall { needed: pos + 1, got: cap });
            }
            dst[pos] = 0xfe + bit;
            pos += 1;
            i += 2;
        } else if b > 1 {
            if pos >= cap {
                return Err(BrcError::BufferTooSmall { needed: pos + 1, got: cap });
            }
            dst[pos] = b - 1;
            pos += 1;
            i += 1;
        } else {
            let mut a: u32 = 1;
            while i < body.len() && body[i] <= 1 {
                a = (a << 1) | body[i] as u32;
                i += 1;
            }
            let zeros = (a - 1) as usize;
            if pos + zeros > cap {
                return Err(BrcError::BufferTooSmall {
                    needed: pos + zeros,
                    got: cap,
                });
            }
            for slot in &mut dst[pos..pos + zeros] {
                *slot = 0;
            }
            pos += zeros;
        }
    }
    log::trace!("rlt::inverse: {} -> {} bytes (packed)", m, pos);
    Ok(pos)
}
