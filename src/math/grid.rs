/// `num` evenly spaced values over the closed interval `[start, end]`.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num)
                .map(|i| start + (end - start) * i as f64 / last)
                .collect();
            grid[num - 1] = end;
            grid
        }
    }
}
