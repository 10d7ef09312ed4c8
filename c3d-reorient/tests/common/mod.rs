#![allow(dead_code)]
/// Synthetic C3D files for integration tests.

use c3d_reorient::c3d::Processor;
use std::path::Path;

const BLOCK: usize = 512;

/// Description of a small acquisition to serialise.
pub struct C3dFixture {
    pub processor: Processor,
    /// Positive for integer storage, negative for float storage.
    pub scale_factor: f32,
    pub frame_rate: f32,
    pub labels: Vec<String>,
    /// `trajectories[marker][frame]`
    pub trajectories: Vec<Vec<[f64; 3]>>,
    /// Raw fourth point word per marker and frame; negative marks invalid.
    pub residual_words: Vec<Vec<i16>>,
    pub analog_per_frame: usize,
}

impl C3dFixture {
    /// Three markers over four frames with one invalid sample and two analog channels.
    pub fn gait(processor: Processor, float: bool) -> Self {
        let trajectories = vec![
            vec![[1.5, 2.0, -3.0], [2.5, 3.0, -4.0], [3.5, 4.0, -5.0], [4.5, 5.0, -6.0]],
            vec![[-10.0, 20.5, 30.0], [-11.0, 21.5, 31.0], [0.0, 0.0, 0.0], [-13.0, 23.5, 33.0]],
            vec![
                [100.0, -200.0, 50.5],
                [101.0, -201.0, 51.5],
                [102.0, -202.0, 52.5],
                [103.0, -203.0, 53.5],
            ],
        ];
        let residual_words = vec![
            vec![0x0102, 0x0102, 0x0102, 0x0102],
            vec![0x0301, 0x0301, -1, 0x0301],
            vec![0, 0, 0, 0],
        ];

        Self {
            processor,
            scale_factor: if float { -0.5 } else { 0.5 },
            frame_rate: 100.0,
            labels: vec!["LASI".into(), "RASI".into(), "C7".into()],
            trajectories,
            residual_words,
            analog_per_frame: 2,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.trajectories.first().map_or(0, Vec::len)
    }

    fn is_float(&self) -> bool {
        self.scale_factor < 0.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let p = self.processor;
        let mut bytes = vec![0u8; 2 * BLOCK];

        // Header block.
        bytes[0] = 2;
        bytes[1] = 0x50;
        let put_word = |bytes: &mut Vec<u8>, index: usize, value: u16| {
            let at = (index - 1) * 2;
            bytes[at..at + 2].copy_from_slice(&p.write_u16(value));
        };
        put_word(&mut bytes, 2, self.trajectories.len() as u16);
        put_word(&mut bytes, 3, self.analog_per_frame as u16);
        put_word(&mut bytes, 4, 1);
        put_word(&mut bytes, 5, self.frame_count() as u16);
        put_word(&mut bytes, 9, 3);
        put_word(&mut bytes, 10, if self.analog_per_frame > 0 { 1 } else { 0 });
        bytes[12..16].copy_from_slice(&p.write_f32(self.scale_factor));
        bytes[20..24].copy_from_slice(&p.write_f32(self.frame_rate));

        // Parameter block.
        bytes[BLOCK + 1] = 0x50;
        bytes[BLOCK + 2] = 1;
        bytes[BLOCK + 3] = p.code();
        let mut params = ParameterWriter::new(p, BLOCK + 4);
        params.group(&mut bytes, "POINT", 1);
        params.int(&mut bytes, "USED", 1, self.trajectories.len() as i16);
        params.float(&mut bytes, "SCALE", 1, self.scale_factor);
        params.float(&mut bytes, "RATE", 1, self.frame_rate);
        params.chars(&mut bytes, "UNITS", 1, &["mm".to_string()]);
        params.chars(&mut bytes, "LABELS", 1, &self.labels);
        params.group(&mut bytes, "ANALOG", 2);
        params.int(&mut bytes, "USED", 2, self.analog_per_frame as i16);

        // Data section.
        for frame in 0..self.frame_count() {
            for (marker, trajectory) in self.trajectories.iter().enumerate() {
                let residual = self.residual_words[marker][frame];
                for &value in &trajectory[frame] {
                    self.push_value(&mut bytes, value);
                }
                if self.is_float() {
                    bytes.extend_from_slice(&p.write_f32(f32::from(residual)));
                } else {
                    bytes.extend_from_slice(&p.write_i16(residual));
                }
            }
            for channel in 0..self.analog_per_frame {
                let sample = (frame * 10 + channel) as i16 - 7;
                if self.is_float() {
                    bytes.extend_from_slice(&p.write_f32(f32::from(sample) * 0.25));
                } else {
                    bytes.extend_from_slice(&p.write_i16(sample));
                }
            }
        }

        let padded = bytes.len().div_ceil(BLOCK) * BLOCK;
        bytes.resize(padded, 0);
        bytes
    }

    fn push_value(&self, bytes: &mut Vec<u8>, value: f64) {
        if self.is_float() {
            bytes.extend_from_slice(&self.processor.write_f32(value as f32));
        } else {
            let word = (value / f64::from(self.scale_factor)).round() as i16;
            bytes.extend_from_slice(&self.processor.write_i16(word));
        }
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).unwrap();
    }
}

struct ParameterWriter {
    processor: Processor,
    pos: usize,
}

impl ParameterWriter {
    fn new(processor: Processor, pos: usize) -> Self {
        Self { processor, pos }
    }

    fn entry(&mut self, bytes: &mut [u8], name: &str, id: i8, body: &[u8]) {
        let pos = self.pos;
        bytes[pos] = name.len() as u8;
        bytes[pos + 1] = id as u8;
        bytes[pos + 2..pos + 2 + name.len()].copy_from_slice(name.as_bytes());
        let offset_at = pos + 2 + name.len();
        let next = (2 + body.len()) as u16;
        bytes[offset_at..offset_at + 2].copy_from_slice(&self.processor.write_u16(next));
        bytes[offset_at + 2..offset_at + 2 + body.len()].copy_from_slice(body);
        self.pos = offset_at + next as usize;
    }

    fn group(&mut self, bytes: &mut [u8], name: &str, id: i8) {
        self.entry(bytes, name, -id, &[0]);
    }

    fn int(&mut self, bytes: &mut [u8], name: &str, group: i8, value: i16) {
        let mut body = vec![2, 0];
        body.extend_from_slice(&self.processor.write_i16(value));
        body.push(0);
        self.entry(bytes, name, group, &body);
    }

    fn float(&mut self, bytes: &mut [u8], name: &str, group: i8, value: f32) {
        let mut body = vec![4, 0];
        body.extend_from_slice(&self.processor.write_f32(value));
        body.push(0);
        self.entry(bytes, name, group, &body);
    }

    fn chars(&mut self, bytes: &mut [u8], name: &str, group: i8, values: &[String]) {
        let width = values.iter().map(String::len).max().unwrap_or(0).max(1);
        let mut body = vec![(-1i8) as u8, 2, width as u8, values.len() as u8];
        for value in values {
            let mut padded = value.clone().into_bytes();
            padded.resize(width, b' ');
            body.extend_from_slice(&padded);
        }
        body.push(0);
        self.entry(bytes, name, group, &body);
    }
}

/// File names currently in `dir`, sorted.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
