//! Turning controller bytes into text.
//!
//! Exports from controllers are often ISO-8859-1 rather than UTF-8, and some tools
//! write UTF-16 with a byte order mark.  A BOM is honored when present.  Otherwise strict
//! UTF-8 is tried, and failing that every byte is taken as a Latin-1 character, so only a
//! broken BOM-declared stream can fail.

use std::borrow::Cow;
use encoding_rs::{Encoding,mem::decode_latin1};
use log::{debug,info};
use crate::lang::Error;

pub const LATIN1: &str = "ISO-8859-1";
pub const UTF8: &str = "UTF-8";

/// Decode bytes, returning the text and the name of the encoding that was used.
/// The text is not yet newline normalized.
pub fn decode(bytes: &[u8]) -> Result<(Cow<'_,str>,&'static str),Error> {
    if let Some((encoding,bom_len)) = Encoding::for_bom(bytes) {
        debug!("found {} byte order mark",encoding.name());
        let (txt,malformed) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if malformed && encoding==encoding_rs::UTF_8 {
            info!("UTF-8 byte order mark with malformed data, falling back to {}",LATIN1);
            return Ok((decode_latin1(&bytes[bom_len..]),LATIN1));
        }
        if malformed {
            return Err(Error::UnsupportedEncoding);
        }
        info!("decoded as {}",encoding.name());
        return Ok((txt,encoding.name()));
    }
    match std::str::from_utf8(bytes) {
        Ok(txt) => {
            info!("decoded as {}",UTF8);
            Ok((Cow::Borrowed(txt),UTF8))
        },
        Err(e) => {
            info!("not UTF-8 ({}), falling back to {}",e,LATIN1);
            Ok((decode_latin1(bytes),LATIN1))
        }
    }
}

/// Replace `\r\n` and bare `\r` with `\n`.
pub fn normalize_newlines(txt: &str) -> String {
    if !txt.contains('\r') {
        return txt.to_string();
    }
    txt.replace("\r\n","\n").replace('\r',"\n")
}

/// Decode and normalize in one step.
pub fn decode_text(bytes: &[u8]) -> Result<(String,&'static str),Error> {
    let (txt,encoding) = decode(bytes)?;
    Ok((normalize_newlines(&txt),encoding))
}
