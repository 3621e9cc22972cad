use lazyseg::ops::{MaxAdd, MinAdd, Neutral, SumAdd, SumAssign};
use lazyseg::RangeSegmentTree;

const SEQ: [i64; 6] = [1, 3, 5, 7, 9, 11];

/// Query 1..=3, add 10 to 1..=4, query again, overwrite index 1, query again.
fn run<O: Neutral<Value = i64, Update = i64>>(name: &str, ops: O) -> lazyseg::Result<()> {
    let mut tree = RangeSegmentTree::from_preset(&SEQ, ops)?;
    println!("== {} ==", name);
    println!("{} from index 1 to 3: {}", name, tree.query(1, 3)?);

    tree.range_update(1, 4, 10)?;
    println!("After range update: {}", tree.query(1, 3)?);

    tree.point_update(1, 10)?;
    println!("After point update: {}", tree.query(1, 3)?);
    println!("Values: {:?}", tree.to_vec());
    Ok(())
}

fn main() -> lazyseg::Result<()> {
    run("Sum", SumAdd)?;
    run("Minimum", MinAdd)?;
    run("Maximum", MaxAdd)?;

    let mut tree = RangeSegmentTree::from_preset(&SEQ, SumAssign)?;
    println!("== Assign ==");
    tree.range_update(0, 5, Some(2))?;
    tree.range_update(2, 3, Some(-1))?;
    println!("Sum after assignments: {}", tree.total());
    println!("Values: {:?}", tree.to_vec());

    match tree.query(4, 2) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("Rejected: {} ({:?})", err, err.kind()),
    }
    Ok(())
}
