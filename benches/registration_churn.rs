//! This bench test simulates a busy registration window: a popular course is
//! oversubscribed, then seat holders drop out one by one so that every
//! cancellation promotes from the waitlist.

#![allow(missing_docs)]

use std::rc::Rc;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use registrar::{Course, Student, domain::DeclaredCounts};

const CAPACITY: usize = 100;
const APPLICANTS: i64 = 1_000;

fn students() -> Vec<Rc<Student>> {
    // Interleave ids so inserts land throughout the rosters.
    (0..APPLICANTS)
        .map(|i| (i * 7919) % APPLICANTS)
        .map(|id| Rc::new(Student::try_new(id, format!("student{id}")).unwrap()))
        .collect()
}

fn registration_churn(c: &mut Criterion) {
    let students = students();

    c.bench_function("register then cancel with promotion", |b| {
        b.iter_batched(
            || Course::new("CS101", "Programming", CAPACITY, DeclaredCounts::default()),
            |mut course| {
                for student in &students {
                    course.register(Rc::clone(student));
                }
                for student in &students {
                    course.cancel(student);
                }
                course
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, registration_churn);
criterion_main!(benches);
