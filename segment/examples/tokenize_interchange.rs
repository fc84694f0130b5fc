use std::env;
use std::fs;

use segment::SegmentTokenizer;

fn main() {
    let path = env::args().nth(1).expect("usage: tokenize_interchange <file>");
    let data = fs::read(&path).expect("failed to read input file");

    let tokenizer = match SegmentTokenizer::new(&data) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot tokenize {}: {}", path, e);
            std::process::exit(1);
        }
    };

    for result in tokenizer {
        match result {
            Ok(segment) => {
                let fields: Vec<&str> = segment
                    .fields()
                    .map(|f| f.as_str().unwrap_or("<non-utf8>"))
                    .collect();
                println!("{}: {:?}", segment.id_str().unwrap_or("?"), fields);
            }
            Err(e) => {
                eprintln!("tokenize error: {}", e);
                break;
            }
        }
    }
}
