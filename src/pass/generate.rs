//! Password generation.

use std::io::Write;

use zeroize::Zeroizing;

use super::{Password, SecureBufWriter, charset};
use crate::error::{Error, Result};
use crate::rand::{EntropySource, Sampler};
use crate::settings::Settings;

/// Generate one password of `max(length, mandatory.len())` characters.
///
/// One character is drawn from every mandatory subset, the rest from the
/// alphabet, then the whole buffer is shuffled so the mandatory picks do not
/// sit at the front. Any sampler error aborts; the partial buffer is zeroized.
pub fn generate<S: EntropySource>(
    length: usize,
    alphabet: &[char],
    mandatory: &[Vec<char>],
    sampler: &mut Sampler<S>,
) -> Result<Password> {
    if alphabet.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    let length = length.max(mandatory.len());
    let mut buf: Zeroizing<Vec<char>> = Zeroizing::new(Vec::new());
    buf.try_reserve_exact(length).map_err(|_| Error::TooLong(length))?;

    for subset in mandatory {
        buf.push(sampler.pick(subset)?);
    }

    while buf.len() < length {
        buf.push(sampler.pick(alphabet)?);
    }

    sampler.shuffle(buf.as_mut_slice())?;

    Ok(Password(Zeroizing::new(buf.iter().collect())))
}

/// Generate `settings.number_of_passwords` passwords, one per line on `out`.
///
/// The charset is built once; an empty alphabet fails before anything is
/// written. Returns the last password when it is headed for the clipboard.
pub fn generate_batch<S: EntropySource, W: Write>(
    settings: &Settings,
    sampler: &mut Sampler<S>,
    out: W,
) -> Result<Option<Password>> {
    let charset = charset::build(settings);
    if charset.alphabet.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    tracing::debug!(
        count = settings.number_of_passwords,
        length = settings.pass_length,
        source = sampler.source_name(),
        "generating"
    );

    let mut out = SecureBufWriter::new(out);
    let mut last = None;

    for _ in 0..settings.number_of_passwords {
        let pass = generate(
            settings.pass_length,
            &charset.alphabet,
            &charset.mandatory,
            sampler,
        )?;

        out.write_all(pass.as_str().as_bytes()).map_err(Error::Output)?;
        out.write_all(b"\n").map_err(Error::Output)?;

        if settings.to_clipboard {
            last = Some(pass);
        }
    }

    out.flush().map_err(Error::Output)?;
    Ok(last)
}
