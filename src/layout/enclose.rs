//! Smallest circle enclosing a set of circles
//!
//! Randomized incremental construction: circles are visited in shuffled order,
//! and whenever one falls outside the current enclosure the support basis (at
//! most three circles) is extended and the scan restarts.

use super::error::LayoutError;
use super::random::Lcg;
use super::types::Circle;

/// Compute the smallest circle enclosing every circle in `circles`
pub fn enclose(circles: &[Circle], random: &mut Lcg) -> Result<Circle, LayoutError> {
    let mut order: Vec<Circle> = circles.to_vec();
    random.shuffle(&mut order);

    let mut basis: Vec<Circle> = Vec::new();
    let mut enclosure: Option<Circle> = None;
    let mut i = 0;

    while i < order.len() {
        let p = order[i];
        match enclosure {
            Some(e) if encloses_weak(&e, &p) => i += 1,
            _ => {
                basis = extend_basis(&basis, p).ok_or(LayoutError::EnclosureFailed {
                    circles: circles.len(),
                })?;
                enclosure = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }

    Ok(enclosure.unwrap_or_default())
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(&p, basis) {
        return Some(vec![p]);
    }

    // New basis of two circles
    for b in basis {
        if encloses_not(&p, b) && encloses_weak_all(&enclose_two(b, &p), basis) {
            return Some(vec![*b, p]);
        }
    }

    // New basis of three circles
    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (&basis[i], &basis[j]);
            if encloses_not(&enclose_two(bi, bj), &p)
                && encloses_not(&enclose_two(bi, &p), bj)
                && encloses_not(&enclose_two(bj, &p), bi)
                && encloses_weak_all(&enclose_three(bi, bj, &p), basis)
            {
                return Some(vec![*bi, *bj, p]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_two(a, b),
        [a, b, c] => enclose_three(a, b, c),
        _ => Circle::default(),
    }
}

fn enclose_two(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = x21.hypot(y21);
    if l == 0.0 {
        return if a.r >= b.r { *a } else { *b };
    }
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_three(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn enclose_all(circles: &[Circle]) -> Circle {
        enclose(circles, &mut Lcg::new()).expect("enclosure")
    }

    #[test]
    fn test_single_circle() {
        let c = Circle::new(3.0, -2.0, 5.0);
        assert_eq!(enclose_all(&[c]), c);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(enclose_all(&[]), Circle::default());
    }

    #[test]
    fn test_two_touching_circles() {
        let e = enclose_all(&[Circle::new(-1.0, 0.0, 1.0), Circle::new(2.0, 0.0, 2.0)]);
        assert!((e.r - 3.0).abs() < EPS);
        assert!((e.x - 1.0).abs() < EPS);
        assert!(e.y.abs() < EPS);
    }

    #[test]
    fn test_three_equal_circles() {
        // Centers on an equilateral triangle of circumradius 2
        let k = 3f64.sqrt();
        let circles = [
            Circle::new(0.0, 2.0, 1.0),
            Circle::new(-k, -1.0, 1.0),
            Circle::new(k, -1.0, 1.0),
        ];
        let e = enclose_all(&circles);
        assert!((e.r - 3.0).abs() < 1e-6, "r = {}", e.r);
        assert!(e.x.abs() < 1e-6 && e.y.abs() < 1e-6);
    }

    #[test]
    fn test_encloses_every_input() {
        let mut random = Lcg::new();
        let circles: Vec<Circle> = (0..25)
            .map(|_| {
                Circle::new(
                    random.next_f64() * 100.0,
                    random.next_f64() * 100.0,
                    random.next_f64() * 10.0,
                )
            })
            .collect();
        let e = enclose_all(&circles);
        for c in &circles {
            assert!(e.contains(c, 1e-6), "{:?} escapes {:?}", c, e);
        }
    }

    #[test]
    fn test_nested_circle_is_ignored() {
        let big = Circle::new(0.0, 0.0, 10.0);
        let e = enclose_all(&[Circle::new(1.0, 1.0, 2.0), big]);
        assert_eq!(e, big);
    }
}
