//! The in-progress answer.

/// Ordered characters typed so far. Only the end of the buffer is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    chars: Vec<char>,
}

impl AnswerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, c: char) {
        self.chars.push(c);
    }

    /// Remove the last character. No-op when empty.
    pub fn delete_last(&mut self) -> Option<char> {
        self.chars.pop()
    }

    /// The buffer contents as a string.
    pub fn snapshot(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum Op {
        Append(char),
        DeleteLast,
    }

    fn replay(ops: &[Op]) -> (AnswerBuffer, Vec<char>) {
        let mut buffer = AnswerBuffer::new();
        let mut model = Vec::new();
        for op in ops {
            match *op {
                Op::Append(c) => {
                    buffer.append(c);
                    model.push(c);
                }
                Op::DeleteLast => {
                    buffer.delete_last();
                    model.pop();
                }
            }
        }
        (buffer, model)
    }

    #[test]
    fn snapshot_matches_stack_replay() {
        let scripts: Vec<Vec<Op>> = vec![
            vec![],
            vec![Op::DeleteLast, Op::DeleteLast],
            vec![Op::Append('A'), Op::Append('B'), Op::DeleteLast, Op::Append('C')],
            vec![Op::Append('é'), Op::Append('✓'), Op::DeleteLast],
            vec![Op::Append('A'), Op::DeleteLast, Op::DeleteLast, Op::Append(',')],
        ];
        for ops in scripts {
            let (buffer, model) = replay(&ops);
            assert_eq!(buffer.snapshot(), model.iter().collect::<String>());
            assert_eq!(buffer.len(), model.len());
        }
    }

    #[test]
    fn snapshot_matches_replay_for_generated_sequences() {
        // Every sequence of up to 8 operations over {append 'x', append 'y', delete}.
        for len in 0..=8u32 {
            for code in 0..3u32.pow(len) {
                let mut n = code;
                let ops: Vec<Op> = (0..len)
                    .map(|_| {
                        let op = match n % 3 {
                            0 => Op::Append('x'),
                            1 => Op::Append('y'),
                            _ => Op::DeleteLast,
                        };
                        n /= 3;
                        op
                    })
                    .collect();
                let (buffer, model) = replay(&ops);
                assert_eq!(buffer.snapshot(), model.iter().collect::<String>());
            }
        }
    }

    #[test]
    fn delete_last_on_empty_is_noop() {
        let mut buffer = AnswerBuffer::new();
        assert_eq!(buffer.delete_last(), None);
        assert!(buffer.is_empty());
        assert_eq!(buffer.snapshot(), "");
    }
}
