/*!
Parsing and formatting of datetimes with "printf" style format strings.

This format is reached through
[`DateTime::strptime`](crate::DateTime::strptime),
[`DateTime::parse`](crate::DateTime::parse) and the `format` and `strftime`
families of methods on [`DateTime`](crate::DateTime).

While the routines in this module very closely resemble the corresponding
`strptime` and `strftime` POSIX functions, it is not a goal to precisely
match POSIX semantics. There is no localization: names are English and
matched ASCII case insensitively.

# Conversion specifications

| Specifier | Example | Description |
| --------- | ------- | ----------- |
| `%%` | `%%` | A literal `%`. |
| `%A`, `%a` | `Sunday`, `Sun` | The full and abbreviated weekday. |
| `%B`, `%b`, `%h` | `June`, `Jun`, `Jun` | The full and abbreviated month name. |
| `%C` | `20` | The century of the year. Formatting only. |
| `%D` | `7/14/24` | Equivalent to `%m/%d/%y`. |
| `%d`, `%e` | `25`, ` 5` | The day of the month. `%d` is zero-padded, `%e` is space padded. |
| `%F` | `2024-07-14` | Equivalent to `%Y-%m-%d`. |
| `%f` | `005` | Milliseconds, as exactly three digits. |
| `%H` | `23` | The hour in a 24 hour clock. Zero padded. |
| `%I` | `11` | The hour in a 12 hour clock. Zero padded. |
| `%j` | `060` | The day of the year. Range is `1..=366`. Zero padded to 3 digits. |
| `%k` | `15` | The hour in a 24 hour clock. Space padded. |
| `%l` | ` 3` | The hour in a 12 hour clock. Space padded. |
| `%M` | `04` | The minute. Zero padded. |
| `%m` | `01` | The month. Zero padded. |
| `%n` | `\n` | Formats as a newline character. Parses arbitrary whitespace. |
| `%P` | `am` | Whether the time is in the AM or PM, lowercase. |
| `%p` | `PM` | Whether the time is in the AM or PM, uppercase. |
| `%R` | `23:30` | Equivalent to `%H:%M`. |
| `%S` | `59`, `59.005` | The second. Zero padded. Millisecond aware routines include a fraction. |
| `%s` | `1737396540` | A Unix timestamp, in seconds. |
| `%T` | `23:30:59` | Equivalent to `%H:%M:%S`. |
| `%t` | `\t` | Formats as a tab character. Parses arbitrary whitespace. |
| `%u` | `7` | The day of the week beginning with Monday at `1`. |
| `%w` | `0` | The day of the week beginning with Sunday at `0`. |
| `%Y` | `2024` | A full year, including century. At least 4 digits when formatting. |
| `%y` | `24` | A two-digit year. Parsing maps `69..=99` to `19xx` and `00..=68` to `20xx`. |

When parsing, a whitespace byte in the format string matches zero or more
whitespace bytes in the input, numbers may omit their leading zeros, and the
entire input must be consumed. A year is required. The month and day default
to `1` when absent (unless `%j` is present), and absent time units default to
zero. Smaller time units can't be present without bigger ones, and `%I`
requires `%p` (or `%P`).
*/

pub(crate) mod strtime;
