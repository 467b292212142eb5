#![no_main]

use libfuzzer_sys::{
    arbitrary,
    arbitrary::{Arbitrary, Unstructured},
    fuzz_target,
};

use fdate::DateTime;

#[derive(Debug)]
struct Input<'a> {
    format: &'a str,
    input: &'a str,
}

impl<'a> Arbitrary<'a> for Input<'a> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let fmt_len: u8 = u.arbitrary()?;
        let in_len: u16 = u.arbitrary()?;
        let format = u.bytes(fmt_len as usize)?;
        let format = core::str::from_utf8(format)
            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        let input = u.bytes(in_len as usize)?;
        let input = core::str::from_utf8(input)
            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        Ok(Input { format, input })
    }

    fn arbitrary_take_rest(
        mut u: Unstructured<'a>,
    ) -> arbitrary::Result<Self> {
        let len: u8 = u.arbitrary()?;
        // ignored in take rest, but keep it consistent
        let _in_len: u16 = u.arbitrary()?;
        let format = u.bytes(len as usize)?;
        let format = core::str::from_utf8(format)
            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        let input = u.take_rest();
        let input = core::str::from_utf8(input)
            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        Ok(Input { format, input })
    }
}

fn do_fuzz(src: Input) {
    let Ok(first) = DateTime::strptime(src.format, src.input) else {
        return;
    };
    // The formatter is stricter than the parser about some directives (for
    // example, a format with only `%%`), so failure here is accepted.
    let Ok(printed) = first.strftime_with_milliseconds(src.format) else {
        return;
    };
    match DateTime::strptime(src.format, &printed) {
        Ok(second) => {
            // Not every directive round trips to the same instant (`%y`
            // loses the century), so compare the printed forms instead.
            let printed_again = second
                .strftime_with_milliseconds(src.format)
                .expect("parsed twice, so it should print");
            assert_eq!(
                printed, printed_again,
                "expected the initially parsed value \
                 to be equal to the value after \
                 printing and re-parsing; \
                 found `{printed_again}', expected `{printed}'",
            );
        }
        Err(e) if cfg!(not(feature = "relaxed")) => {
            panic!(
                "should be able to parse a printed value; \
                 failed with `{e}` at: `{printed}`, \
                 corresponding to {first:?}",
            );
        }
        Err(_) => {}
    }
}

fuzz_target!(|data: Input<'_>| do_fuzz(data));
