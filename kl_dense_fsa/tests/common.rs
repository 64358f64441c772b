
#![allow(dead_code)]

use kl_dense_fsa::{compile, Compilation, Config};

pub fn assert_iter_eq<I1, I2>(mut i1: I1, mut i2: I2)
    where I1 : Iterator, I2 : Iterator,
    <I1 as Iterator>::Item : PartialEq<<I2 as Iterator>::Item> + std::fmt::Debug,
    <I2 as Iterator>::Item : std::fmt::Debug {
    loop {
        match (i1.next(), i2.next()) {
            (Some(a), Some(b)) => assert_eq!(a, b),
            (None, None) => return,
            (Some(a), None) => panic!("RHS terminates early ({:?})!", a),
            (None, Some(b)) => panic!("LHS terminates early ({:?})!", b),
        }
    }
}

/// Every string over `alphabet` with at most `max_len` characters, shortest
/// first.
pub fn strings_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut result = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::with_capacity(last.len() * alphabet.len());
        for prefix in &last {
            for c in alphabet {
                let mut s = prefix.clone();
                s.push(*c);
                next.push(s);
            }
        }
        result.extend(next.iter().cloned());
        last = next;
    }
    result
}

pub fn compiled(rx: &str) -> Compilation {
    compile(rx, &Config::default()).unwrap()
}
