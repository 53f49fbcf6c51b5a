use avl_tree::AvlTree;

fn main() {
    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(20);
    tree.insert(30);
    tree.insert(40);
    tree.insert(50);
    tree.insert(25);

    println!("inorder:   {:?}", tree.inorder());
    println!("preorder:  {:?}", tree.preorder());
    println!("postorder: {:?}", tree.postorder());

    if let (Ok(min), Ok(max)) = (tree.min(), tree.max()) {
        println!("min = {min}, max = {max}");
    }

    assert!(tree.contains(&25));
    assert!(!tree.contains(&35));

    tree.remove(&30);
    println!("after removing 30: {:?}", tree.inorder());

    print!("{{ ");
    for value in &tree {
        print!("{value}, ");
    }
    println!("}}");

    tree.clear();
    assert!(tree.is_empty());
}
