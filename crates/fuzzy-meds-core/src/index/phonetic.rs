//! Soundex codes for coarse phonetic grouping.

/// Length of a Soundex code.
const CODE_LENGTH: usize = 4;

/// Soundex code of a single word.
///
/// The first character is kept (uppercased); later consonants map to digit
/// classes, a digit is appended only when it differs from the previous
/// character's class, and the result is padded with `0` to four characters.
pub fn soundex(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return "0".repeat(CODE_LENGTH);
    };

    let first = first.to_uppercase().next().unwrap_or(first);
    let mut code = String::with_capacity(CODE_LENGTH);
    code.push(first);
    let mut len = 1;
    let mut previous = class_of(first);

    for c in chars {
        if len == CODE_LENGTH {
            break;
        }
        let class = class_of(c.to_ascii_uppercase());
        if class != '0' && class != previous {
            code.push(class);
            len += 1;
        }
        previous = class;
    }

    while len < CODE_LENGTH {
        code.push('0');
        len += 1;
    }
    code
}

fn class_of(c: char) -> char {
    match c {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        _ => '0',
    }
}
